//! Project CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::session::{PageArgs, Session};
use super::team::resolved_team;
use crate::domain::{EntityKind, Filter, ProjectScope};
use crate::resolve::resolve_project;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Show one project
    Get {
        /// Project ID, slug ID, or exact name
        project: String,
    },

    /// List projects, optionally narrowed by team and status
    List {
        /// Team ID, key, or name
        #[arg(long)]
        team: Option<String>,

        /// Project status (case-insensitive exact match, e.g. started)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Search projects by name (substring match)
    Search {
        /// Search text
        text: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

pub fn run(cmd: ProjectCommands, session: &Session) -> Result<()> {
    match cmd {
        ProjectCommands::Get { project } => get_project(session, &project),
        ProjectCommands::List { team, status, page } => {
            list_scoped(session, team.as_deref(), status, &page)
        }
        ProjectCommands::Search { text, page } => search_projects(session, text, &page),
    }
}

fn get_project(session: &Session, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    session
        .output
        .verbose_ctx("project", &format!("Resolving project: {}", reference));

    let project =
        resolve_project(tracker.as_ref(), reference)?.into_result(EntityKind::Project)?;
    session.output.verbose_ctx(
        "project",
        &format!("Resolved {} to {} ({})", reference, project.id, project.slug_id),
    );

    session.output.data(&project)
}

fn list_scoped(
    session: &Session,
    team_ref: Option<&str>,
    status: Option<String>,
    args: &PageArgs,
) -> Result<()> {
    let tracker = session.tracker()?;
    let team_id = match team_ref {
        Some(reference) => Some(resolved_team(session, tracker.as_ref(), reference)?.id),
        None => None,
    };
    let scope = ProjectScope { team_id, status };
    session
        .output
        .verbose_ctx("project", &format!("Listing with {:?}", scope));

    let request = session.page_request(args)?;
    let page = tracker.scoped_projects(&scope, &request)?;
    session.output.page(&page)
}

fn search_projects(session: &Session, text: String, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let request = session.page_request(args)?;
    let page = tracker.projects(&Filter::Contains(text), &request)?;
    session.output.page(&page)
}

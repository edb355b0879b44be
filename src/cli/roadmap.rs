//! Roadmap CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::session::{PageArgs, Session};
use crate::domain::{EntityKind, Roadmap, Tracker};
use crate::resolve::resolve_roadmap;

#[derive(Subcommand)]
pub enum RoadmapCommands {
    /// Show one roadmap
    Get {
        /// Roadmap ID, slug ID, or exact name
        roadmap: String,
    },

    /// List roadmaps
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the projects linked to a roadmap
    Projects {
        /// Roadmap ID, slug ID, or exact name
        roadmap: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

pub fn run(cmd: RoadmapCommands, session: &Session) -> Result<()> {
    match cmd {
        RoadmapCommands::Get { roadmap } => get_roadmap(session, &roadmap),
        RoadmapCommands::List { page } => list_roadmaps(session, &page),
        RoadmapCommands::Projects { roadmap, page } => list_projects(session, &roadmap, &page),
    }
}

fn resolved_roadmap(
    session: &Session,
    tracker: &dyn Tracker,
    reference: &str,
) -> Result<Roadmap> {
    session
        .output
        .verbose_ctx("roadmap", &format!("Resolving roadmap: {}", reference));

    let roadmap = resolve_roadmap(tracker, reference)?.into_result(EntityKind::Roadmap)?;
    session.output.verbose_ctx(
        "roadmap",
        &format!("Resolved {} to {} ({})", reference, roadmap.id, roadmap.slug_id),
    );
    Ok(roadmap)
}

fn get_roadmap(session: &Session, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    let roadmap = resolved_roadmap(session, tracker.as_ref(), reference)?;
    session.output.data(&roadmap)
}

fn list_projects(session: &Session, reference: &str, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let roadmap = resolved_roadmap(session, tracker.as_ref(), reference)?;
    let request = session.page_request(args)?;
    let page = tracker.roadmap_projects(&roadmap.id, &request)?;
    session.output.page(&page)
}

fn list_roadmaps(session: &Session, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let request = session.page_request(args)?;
    let page = tracker.roadmaps(&request)?;
    session.output.page(&page)
}

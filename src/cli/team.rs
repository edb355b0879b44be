//! Team CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::session::{PageArgs, Session};
use crate::domain::{collect_all, EntityKind, Filter, Team, Tracker};
use crate::resolve::resolve_team;

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Show one team
    Get {
        /// Team ID, key, or name
        team: String,
    },

    /// List teams
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List a team's workflow states (valid status values), ordered by position
    States {
        /// Team ID, key, or name
        team: String,
    },
}

pub fn run(cmd: TeamCommands, session: &Session) -> Result<()> {
    match cmd {
        TeamCommands::Get { team } => get_team(session, &team),
        TeamCommands::List { page } => list_teams(session, &page),
        TeamCommands::States { team } => list_states(session, &team),
    }
}

/// Resolves a team reference, failing with the list of known teams
pub(super) fn resolved_team(
    session: &Session,
    tracker: &dyn Tracker,
    reference: &str,
) -> Result<Team> {
    session
        .output
        .verbose_ctx("team", &format!("Resolving team: {}", reference));

    let team = resolve_team(tracker, reference)?.into_result(EntityKind::Team)?;
    session
        .output
        .verbose_ctx("team", &format!("Resolved {} to {} ({})", reference, team.id, team.key));
    Ok(team)
}

fn get_team(session: &Session, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    let team = resolved_team(session, tracker.as_ref(), reference)?;
    session.output.data(&team)
}

fn list_teams(session: &Session, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let request = session.page_request(args)?;
    let page = tracker.teams(&Filter::All, &request)?;
    session.output.page(&page)
}

fn list_states(session: &Session, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    let team = resolved_team(session, tracker.as_ref(), reference)?;

    let mut states = collect_all(|page| tracker.workflow_states(&team.id, &Filter::All, page))?;
    if states.is_empty() {
        anyhow::bail!("No workflow states found for team \"{}\".", team.key);
    }
    states.sort_by(|a, b| a.position.total_cmp(&b.position));

    session.output.data(&states)
}

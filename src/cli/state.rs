//! Workflow state CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::session::Session;
use super::team::resolved_team;
use crate::domain::EntityKind;
use crate::resolve::resolve_workflow_state;

#[derive(Subcommand)]
pub enum StateCommands {
    /// Show one workflow state of a team
    Get {
        /// Team ID, key, or name
        team: String,

        /// Workflow state ID or name (names are only unique within a team)
        state: String,
    },
}

pub fn run(cmd: StateCommands, session: &Session) -> Result<()> {
    match cmd {
        StateCommands::Get { team, state } => get_state(session, &team, &state),
    }
}

fn get_state(session: &Session, team_ref: &str, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    let team = resolved_team(session, tracker.as_ref(), team_ref)?;

    session.output.verbose_ctx(
        "state",
        &format!("Resolving workflow state {} in team {}", reference, team.key),
    );
    let state = resolve_workflow_state(tracker.as_ref(), &team.id, reference)?
        .into_result(EntityKind::WorkflowState)?;

    session.output.data(&state)
}

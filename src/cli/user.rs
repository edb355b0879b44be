//! User CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::session::{PageArgs, Session};
use super::team::resolved_team;
use crate::domain::{EntityKind, Filter};
use crate::resolve::resolve_user;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show one user
    Get {
        /// User ID, name, email, or display name
        user: String,
    },

    /// List users, optionally only the members of one team
    List {
        /// Team ID, key, or name
        #[arg(long)]
        team: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Search users by name, email, or display name (substring match)
    Search {
        /// Search text
        text: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

pub fn run(cmd: UserCommands, session: &Session) -> Result<()> {
    match cmd {
        UserCommands::Get { user } => get_user(session, &user),
        UserCommands::List {
            team: Some(team),
            page,
        } => list_members(session, &team, &page),
        UserCommands::List { team: None, page } => list_users(session, Filter::All, &page),
        UserCommands::Search { text, page } => list_users(session, Filter::Contains(text), &page),
    }
}

fn get_user(session: &Session, reference: &str) -> Result<()> {
    let tracker = session.tracker()?;
    session
        .output
        .verbose_ctx("user", &format!("Resolving user: {}", reference));

    let user = resolve_user(tracker.as_ref(), reference)?.into_result(EntityKind::User)?;
    session
        .output
        .verbose_ctx("user", &format!("Resolved {} to {}", reference, user.id));

    session.output.data(&user)
}

fn list_users(session: &Session, filter: Filter, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let request = session.page_request(args)?;
    let page = tracker.users(&filter, &request)?;
    session.output.page(&page)
}

fn list_members(session: &Session, team_ref: &str, args: &PageArgs) -> Result<()> {
    let tracker = session.tracker()?;
    let team = resolved_team(session, tracker.as_ref(), team_ref)?;
    let request = session.page_request(args)?;
    let page = tracker.team_members(&team.id, &request)?;
    session.output.page(&page)
}

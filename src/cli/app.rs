//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::Output;
use super::session::Session;
use super::{config_cmd, project, roadmap, state, team, user};
use crate::render::Truncation;
use crate::storage::{SettingsStore, SNAPSHOT_ENV};

#[derive(Parser)]
#[command(name = "lin")]
#[command(author, version, about = "Project-tracker CLI for humans and LLMs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Expand truncated fields (comma-separated: description,body,content)
    #[arg(long, global = true, value_name = "FIELDS")]
    pub expand: Option<String>,

    /// Show full content for all truncated fields
    #[arg(long, global = true)]
    pub full: bool,

    /// Workspace snapshot to read entities from
    #[arg(long, global = true, env = SNAPSHOT_ENV, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up users
    #[command(subcommand)]
    User(user::UserCommands),

    /// Look up teams and their workflow states
    #[command(subcommand)]
    Team(team::TeamCommands),

    /// Look up projects
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Look up roadmaps
    #[command(subcommand)]
    Roadmap(roadmap::RoadmapCommands),

    /// Look up workflow states within a team
    #[command(subcommand)]
    State(state::StateCommands),

    /// View and update CLI settings
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = SettingsStore::open_default()?;

    // Config commands must keep working when the settings file is broken.
    let max_length = match cli.command {
        Commands::Config(_) => None,
        _ => settings.load()?.truncation.max_length,
    };
    let truncation = Truncation::configure(cli.full, cli.expand.as_deref(), max_length);

    let output = Output::new(truncation, cli.verbose);
    output.verbose("lin starting");
    output.verbose_ctx(
        "truncation",
        &format!(
            "policy {:?}, max length {}",
            output.truncation().policy(),
            output.truncation().max_length()
        ),
    );

    let session = Session::new(output, settings, cli.snapshot);

    match cli.command {
        Commands::User(cmd) => user::run(cmd, &session)?,
        Commands::Team(cmd) => team::run(cmd, &session)?,
        Commands::Project(cmd) => project::run(cmd, &session)?,
        Commands::Roadmap(cmd) => roadmap::run(cmd, &session)?,
        Commands::State(cmd) => state::run(cmd, &session)?,
        Commands::Config(cmd) => config_cmd::run(cmd, &session)?,
    }

    session.output.verbose("Command completed successfully");
    Ok(())
}

//! Per-invocation context shared by command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{PageRequest, Tracker};
use crate::render::resolve_page_size;
use crate::storage::{parse_page_size, SettingsStore, SnapshotTracker, SNAPSHOT_ENV};

/// Pagination flags shared by list and search commands
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Maximum number of results, 1-250 (defaults to pagination.defaultPageSize, then 50)
    #[arg(long, value_parser = parse_page_size)]
    pub limit: Option<usize>,

    /// Pagination cursor from a previous page's nextCursor
    #[arg(long)]
    pub cursor: Option<String>,
}

/// Everything a command needs for one invocation
pub struct Session {
    pub output: Output,
    settings: SettingsStore,
    snapshot: Option<PathBuf>,
}

impl Session {
    pub fn new(output: Output, settings: SettingsStore, snapshot: Option<PathBuf>) -> Self {
        Self {
            output,
            settings,
            snapshot,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Opens the tracker backing this invocation
    pub fn tracker(&self) -> Result<Box<dyn Tracker>> {
        let path = self.snapshot.as_ref().with_context(|| {
            format!(
                "No workspace snapshot configured. Pass --snapshot <path> or set {}.",
                SNAPSHOT_ENV
            )
        })?;
        self.output
            .verbose_ctx("tracker", &format!("Loading snapshot: {}", path.display()));
        Ok(Box::new(SnapshotTracker::open(path)?))
    }

    /// Builds the page request for a list or search command
    ///
    /// Settings are consulted on every call when no limit is given.
    pub fn page_request(&self, args: &PageArgs) -> Result<PageRequest> {
        let first = resolve_page_size(args.limit, &self.settings)?;
        self.output.verbose_ctx(
            "page",
            &format!("Page size {} (explicit limit: {:?})", first, args.limit),
        );
        Ok(PageRequest::new(first, args.cursor.clone()))
    }
}

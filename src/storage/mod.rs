//! # Storage Layer
//!
//! Local files read and written by lin.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Settings | TOML | `~/.config/lin/config.toml` (or `$LIN_CONFIG_DIR`) |
//! | Workspace snapshot | JSON | `--snapshot <path>` (or `$LIN_SNAPSHOT`) |
//!
//! Settings writes take an exclusive `fs2` lock and are atomic (temp file +
//! rename). Snapshots are read-only.
//!
//! ## Key Types
//!
//! - [`SettingsStore`] - Load and save [`Settings`]
//! - [`SettingKey`] - Dotted keys accepted by `lin config`
//! - [`SnapshotTracker`] - [`Tracker`](crate::domain::Tracker) over a [`Snapshot`]

mod settings;
mod snapshot;

pub use settings::{
    parse_page_size, PaginationSettings, SettingKey, Settings, SettingsError, SettingsStore,
    TruncationSettings, CONFIG_DIR_ENV,
};
pub use snapshot::{Snapshot, SnapshotTracker, SNAPSHOT_ENV};

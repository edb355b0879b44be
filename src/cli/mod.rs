//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | User | People lookup | `user get bob@x.com`, `user search ali` |
//! | Team | Teams and statuses | `team get ENG`, `team states ENG` |
//! | Project | Project lookup | `project get "Apollo"`, `project list --team ENG --status started` |
//! | Roadmap | Roadmap lookup | `roadmap get q3-plan`, `roadmap projects q3-plan` |
//! | State | Workflow states | `state get ENG "In Progress"` |
//! | Config | Settings | `config set pagination.defaultPageSize 100` |
//!
//! ## Output Contract
//!
//! - Single entities print as a pruned, truncated JSON object
//! - Lists print as `{ "items": [...], "pagination"?: { "hasMore": true, "nextCursor": ... } }`
//! - Failures print `{"error": "..."}` on stderr and exit with status 1
//!
//! ## Truncation Flags
//!
//! `description`, `body`, and `content` are cut to 200 characters (or
//! `truncation.maxLength`). `--expand description,body` shows the named
//! fields in full; `--full` shows everything.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! lin --verbose team get ENG
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config_cmd;
mod output;
mod project;
mod roadmap;
mod session;
mod state;
mod team;
mod user;

pub use app::{run, Cli, Commands};
pub use output::Output;
pub use session::{PageArgs, Session};

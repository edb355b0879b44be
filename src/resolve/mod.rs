//! # Identifier Resolution
//!
//! Turns a caller-supplied reference (ID, key, slug, name, or email) into
//! exactly one entity, or a [`Resolution`] explaining why it could not.
//!
//! | Kind | Alternate keys | Fallback search |
//! |------|----------------|-----------------|
//! | user | name, email, display name | full scan of all users |
//! | team | key, name | server-side exact filter |
//! | project | slug ID, name | server-side exact filter |
//! | roadmap | slug ID, name | full scan (no server filter) |
//! | workflow state | name | server-side filter within one team |
//!
//! Resolution never caches, never guesses, and never picks the first of
//! several matches. `NotFound` and `Ambiguous` are terminal for the caller.

mod outcome;
mod resolver;

pub use outcome::{Candidate, Known, Resolution, ResolveError, MAX_KNOWN_CANDIDATES};
pub use resolver::{
    resolve_project, resolve_roadmap, resolve_team, resolve_user, resolve_workflow_state,
    Resolvable,
};

//! lin - A project-tracker CLI for humans and LLMs
//!
//! lin resolves human-friendly identifiers (names, emails, keys, slugs) to
//! exactly one tracker entity, and shapes every response into a stable,
//! size-bounded JSON contract: empty noise pruned, long text truncated with
//! its full length recorded, lists wrapped in a pagination envelope.

pub mod domain;
pub mod resolve;
pub mod render;
pub mod storage;
pub mod cli;

pub use domain::{EntityKind, Tracker, TrackerError};
pub use render::{prune, Envelope, Truncation, TruncationPolicy};
pub use resolve::{Resolution, ResolveError};

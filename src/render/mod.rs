//! # Output Normalization
//!
//! Every payload goes through the same pipeline before it is printed:
//!
//! ```text
//! record ─► prune ─► truncate ─► (lists) envelope ─► stdout
//! ```
//!
//! - [`prune`] drops nulls, blank strings, and empty containers
//! - [`Truncation`] cuts `description`/`body`/`content` and adds `{field}Length`
//! - [`Envelope`] wraps lists as `{ items, pagination? }`
//!
//! All three are total: any JSON value goes in, a JSON value comes out.

mod page;
mod prune;
mod truncate;

pub use page::{resolve_page_size, Envelope, PageDescriptor, DEFAULT_PAGE_SIZE};
pub use prune::prune;
pub use truncate::{
    Truncation, TruncationPolicy, DEFAULT_MAX_LENGTH, ELLIPSIS, TRUNCATABLE_FIELDS,
};

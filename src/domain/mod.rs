//! Domain models for lin
//!
//! Typed entity records and the [`Tracker`] interface to the remote
//! service, without any I/O of their own.

mod entity;
mod tracker;

pub use entity::{EntityKind, Project, Roadmap, Team, User, UserRef, WorkflowState};
pub use tracker::{
    collect_all, Filter, Page, PageInfo, PageRequest, ProjectScope, Tracker, TrackerError,
    MAX_PAGE_SIZE,
};

//! The remote tracker as seen by the resolution layer
//!
//! [`Tracker`] is the only way the rest of the crate talks to the remote
//! service. Each entity kind gets a fetch-by-id operation that fails with
//! [`TrackerError::NotFound`] when the key does not exist, and a filtered
//! search returning one cursor-paginated [`Page`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{EntityKind, Project, Roadmap, Team, User, WorkflowState};

/// Largest page the remote service hands out in one request
pub const MAX_PAGE_SIZE: usize = 250;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Entity not found: {kind} \"{id}\"")]
    NotFound { kind: EntityKind, id: String },

    #[error("{0}")]
    Upstream(String),
}

impl TrackerError {
    /// Returns true if the error means "no entity has this primary key"
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::NotFound { .. })
    }
}

/// Upstream continuation signal. The cursor is opaque and passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn last(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            page_info: PageInfo::default(),
        }
    }
}

/// Page request: at most `first` nodes after the opaque `after` cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: usize,
    pub after: Option<String>,
}

impl PageRequest {
    pub fn new(first: usize, after: Option<String>) -> Self {
        Self { first, after }
    }

    /// First page at the largest size the service allows
    pub fn widest() -> Self {
        Self::new(MAX_PAGE_SIZE, None)
    }
}

/// Server-side search filter
///
/// `Exact` is case-insensitive equality on the kind's alternate keys
/// (team: key or name, project: slug id or name, user: name, email or
/// display name, workflow state: name). `Contains` is a case-insensitive
/// substring match used only by explicit search commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Exact(String),
    Contains(String),
}

/// Narrowing applied by `project list`
///
/// `team_id` is an already-resolved team id. `status` compares
/// case-insensitively against the project state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectScope {
    pub team_id: Option<String>,
    pub status: Option<String>,
}

/// Remote entity client
pub trait Tracker {
    fn user(&self, id: &str) -> Result<User, TrackerError>;
    fn users(&self, filter: &Filter, page: &PageRequest) -> Result<Page<User>, TrackerError>;
    fn team_members(&self, team_id: &str, page: &PageRequest)
        -> Result<Page<User>, TrackerError>;

    fn team(&self, id: &str) -> Result<Team, TrackerError>;
    fn teams(&self, filter: &Filter, page: &PageRequest) -> Result<Page<Team>, TrackerError>;

    fn project(&self, id: &str) -> Result<Project, TrackerError>;
    fn projects(&self, filter: &Filter, page: &PageRequest)
        -> Result<Page<Project>, TrackerError>;
    fn scoped_projects(
        &self,
        scope: &ProjectScope,
        page: &PageRequest,
    ) -> Result<Page<Project>, TrackerError>;

    fn roadmap(&self, id: &str) -> Result<Roadmap, TrackerError>;
    /// Roadmaps cannot be filtered server-side
    fn roadmaps(&self, page: &PageRequest) -> Result<Page<Roadmap>, TrackerError>;
    /// Projects linked to one roadmap
    fn roadmap_projects(
        &self,
        roadmap_id: &str,
        page: &PageRequest,
    ) -> Result<Page<Project>, TrackerError>;

    fn workflow_state(&self, id: &str) -> Result<WorkflowState, TrackerError>;
    fn workflow_states(
        &self,
        team_id: &str,
        filter: &Filter,
        page: &PageRequest,
    ) -> Result<Page<WorkflowState>, TrackerError>;
}

/// Walks every page of a search, following the upstream cursor
pub fn collect_all<T, F>(mut fetch: F) -> Result<Vec<T>, TrackerError>
where
    F: FnMut(&PageRequest) -> Result<Page<T>, TrackerError>,
{
    let mut request = PageRequest::widest();
    let mut all = Vec::new();

    loop {
        let page = fetch(&request)?;
        all.extend(page.nodes);

        match page.page_info.end_cursor {
            Some(cursor) if page.page_info.has_next_page => {
                request = PageRequest::new(MAX_PAGE_SIZE, Some(cursor));
            }
            _ => break,
        }
    }

    Ok(all)
}

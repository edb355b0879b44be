//! File-backed tracker serving a workspace export
//!
//! A snapshot is a single JSON document:
//!
//! ```json
//! {
//!   "users": [...],
//!   "teams": [...],
//!   "projects": [...],
//!   "roadmaps": [...],
//!   "workflowStates": [...]
//! }
//! ```
//!
//! Team membership and roadmap links live on the records themselves
//! (`teamIds` on users and projects, `roadmapIds` on projects).
//!
//! [`SnapshotTracker`] answers [`Tracker`] calls from it with the same
//! semantics as the remote service: fetch-by-id fails with
//! [`TrackerError::NotFound`], filters compare case-insensitively, and pages
//! carry an opaque cursor (the id of the last node returned).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{
    EntityKind, Filter, Page, PageInfo, PageRequest, Project, ProjectScope, Roadmap, Team,
    Tracker, TrackerError, User, WorkflowState,
};

/// Environment variable naming the snapshot file
pub const SNAPSHOT_ENV: &str = "LIN_SNAPSHOT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub projects: Vec<Project>,
    pub roadmaps: Vec<Roadmap>,
    pub workflow_states: Vec<WorkflowState>,
}

impl Snapshot {
    /// Reads a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
    }
}

/// [`Tracker`] over an in-memory [`Snapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotTracker {
    snapshot: Snapshot,
}

impl SnapshotTracker {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Snapshot::load(path)?))
    }
}

fn lower(s: &str) -> String {
    s.to_lowercase()
}

fn equals(field: &str, needle: &str) -> bool {
    lower(field) == lower(needle)
}

fn contains(field: &str, needle: &str) -> bool {
    lower(field).contains(&lower(needle))
}

/// Applies `filter` using `keys` as the searchable fields of each record
fn matches_filter(filter: &Filter, keys: &[&str]) -> bool {
    match filter {
        Filter::All => true,
        Filter::Exact(needle) => keys.iter().any(|k| equals(k, needle)),
        Filter::Contains(needle) => keys.iter().any(|k| contains(k, needle)),
    }
}

fn find<T: Clone>(
    records: &[T],
    kind: EntityKind,
    id: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<T, TrackerError> {
    records
        .iter()
        .find(|r| id_of(*r) == id)
        .cloned()
        .ok_or_else(|| TrackerError::NotFound {
            kind,
            id: id.to_string(),
        })
}

/// Cuts one page out of the filtered records, starting after the cursor
fn paginate<'a, T: Clone + 'a>(
    records: impl Iterator<Item = &'a T>,
    page: &PageRequest,
    id_of: impl Fn(&T) -> &str,
) -> Result<Page<T>, TrackerError> {
    let matching: Vec<&T> = records.collect();

    let start = match &page.after {
        Some(cursor) => {
            let position = matching
                .iter()
                .position(|r| id_of(*r) == cursor.as_str())
                .ok_or_else(|| TrackerError::Upstream(format!("Invalid cursor: {}", cursor)))?;
            position + 1
        }
        None => 0,
    };

    let end = start.saturating_add(page.first).min(matching.len());
    let nodes: Vec<T> = matching[start.min(end)..end].iter().map(|r| (*r).clone()).collect();
    let has_next_page = end < matching.len();
    let end_cursor = nodes.last().map(|r| id_of(r).to_string());

    Ok(Page {
        nodes,
        page_info: PageInfo {
            has_next_page,
            end_cursor,
        },
    })
}

impl Tracker for SnapshotTracker {
    fn user(&self, id: &str) -> Result<User, TrackerError> {
        find(&self.snapshot.users, EntityKind::User, id, |u| u.id.as_str())
    }

    fn users(&self, filter: &Filter, page: &PageRequest) -> Result<Page<User>, TrackerError> {
        let records = self.snapshot.users.iter().filter(|u| {
            let display = u.display_name.as_deref().unwrap_or_default();
            matches_filter(filter, &[u.name.as_str(), u.email.as_str(), display])
        });
        paginate(records, page, |u| u.id.as_str())
    }

    fn team_members(
        &self,
        team_id: &str,
        page: &PageRequest,
    ) -> Result<Page<User>, TrackerError> {
        let records = self
            .snapshot
            .users
            .iter()
            .filter(|u| u.team_ids.iter().any(|t| t == team_id));
        paginate(records, page, |u| u.id.as_str())
    }

    fn team(&self, id: &str) -> Result<Team, TrackerError> {
        find(&self.snapshot.teams, EntityKind::Team, id, |t| t.id.as_str())
    }

    fn teams(&self, filter: &Filter, page: &PageRequest) -> Result<Page<Team>, TrackerError> {
        let records = self
            .snapshot
            .teams
            .iter()
            .filter(|t| matches_filter(filter, &[t.key.as_str(), t.name.as_str()]));
        paginate(records, page, |t| t.id.as_str())
    }

    fn project(&self, id: &str) -> Result<Project, TrackerError> {
        find(&self.snapshot.projects, EntityKind::Project, id, |p| p.id.as_str())
    }

    fn projects(&self, filter: &Filter, page: &PageRequest) -> Result<Page<Project>, TrackerError> {
        let records = self.snapshot.projects.iter().filter(|p| match filter {
            // Project search only looks at names
            Filter::Contains(_) => matches_filter(filter, &[p.name.as_str()]),
            _ => matches_filter(filter, &[p.slug_id.as_str(), p.name.as_str()]),
        });
        paginate(records, page, |p| p.id.as_str())
    }

    fn scoped_projects(
        &self,
        scope: &ProjectScope,
        page: &PageRequest,
    ) -> Result<Page<Project>, TrackerError> {
        let records = self.snapshot.projects.iter().filter(|p| {
            let in_team = scope
                .team_id
                .as_ref()
                .map_or(true, |team| p.team_ids.contains(team));
            let in_status = scope.status.as_deref().map_or(true, |status| {
                p.state.as_deref().is_some_and(|state| equals(state, status))
            });
            in_team && in_status
        });
        paginate(records, page, |p| p.id.as_str())
    }

    fn roadmap(&self, id: &str) -> Result<Roadmap, TrackerError> {
        find(&self.snapshot.roadmaps, EntityKind::Roadmap, id, |r| r.id.as_str())
    }

    fn roadmaps(&self, page: &PageRequest) -> Result<Page<Roadmap>, TrackerError> {
        paginate(self.snapshot.roadmaps.iter(), page, |r| r.id.as_str())
    }

    fn roadmap_projects(
        &self,
        roadmap_id: &str,
        page: &PageRequest,
    ) -> Result<Page<Project>, TrackerError> {
        let records = self
            .snapshot
            .projects
            .iter()
            .filter(|p| p.roadmap_ids.iter().any(|r| r == roadmap_id));
        paginate(records, page, |p| p.id.as_str())
    }

    fn workflow_state(&self, id: &str) -> Result<WorkflowState, TrackerError> {
        find(
            &self.snapshot.workflow_states,
            EntityKind::WorkflowState,
            id,
            |s| s.id.as_str(),
        )
    }

    fn workflow_states(
        &self,
        team_id: &str,
        filter: &Filter,
        page: &PageRequest,
    ) -> Result<Page<WorkflowState>, TrackerError> {
        let records = self
            .snapshot
            .workflow_states
            .iter()
            .filter(|s| s.team_id == team_id && matches_filter(filter, &[s.name.as_str()]));
        paginate(records, page, |s| s.id.as_str())
    }
}

//! Typed records for the entities the tracker exposes
//!
//! Records mirror the remote service's field names (camelCase on the wire)
//! so they can be printed without a mapping layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of entity an identifier can be resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Team,
    Project,
    Roadmap,
    WorkflowState,
}

impl EntityKind {
    /// Capitalized singular name, used at the start of messages
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Team => "Team",
            EntityKind::Project => "Project",
            EntityKind::Roadmap => "Roadmap",
            EntityKind::WorkflowState => "Workflow state",
        }
    }

    /// Lowercase plural name
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Team => "teams",
            EntityKind::Project => "projects",
            EntityKind::Roadmap => "roadmaps",
            EntityKind::WorkflowState => "workflow states",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::User => "user",
            EntityKind::Team => "team",
            EntityKind::Project => "project",
            EntityKind::Roadmap => "roadmap",
            EntityKind::WorkflowState => "workflow state",
        };
        write!(f, "{}", s)
    }
}

/// Compact reference to a user embedded in another record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Teams the user is a member of
    #[serde(default)]
    pub team_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub lead: Option<UserRef>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub roadmap_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: String,
    pub slug_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A workflow state belongs to exactly one team; names are only unique per team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub state_type: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: f64,
    pub team_id: String,
}

fn default_true() -> bool {
    true
}

//! Resolution outcomes and the errors they turn into

use std::fmt;

use thiserror::Error;

use crate::domain::{EntityKind, TrackerError};

/// Most known candidates listed in a not-found message
pub const MAX_KNOWN_CANDIDATES: usize = 20;

/// One record that matched a reference, with the key it matched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub label: String,
    pub matched: &'static str,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id: {}, matched {})", self.label, self.id, self.matched)
    }
}

/// Bounded list of human-readable labels for entities that do exist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Known {
    pub labels: Vec<String>,
    pub omitted: usize,
}

impl Known {
    pub fn from_labels(labels: impl IntoIterator<Item = String>) -> Self {
        let mut shown = Vec::new();
        let mut omitted = 0;
        for label in labels {
            if shown.len() < MAX_KNOWN_CANDIDATES {
                shown.push(label);
            } else {
                omitted += 1;
            }
        }
        Self {
            labels: shown,
            omitted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for Known {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(", "))?;
        if self.omitted > 0 {
            write!(f, ", and {} more", self.omitted)?;
        }
        Ok(())
    }
}

/// Result of resolving one identifier reference
///
/// Exactly one variant holds: a single match, no match, or several.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    NotFound { reference: String, known: Known },
    Ambiguous { reference: String, matches: Vec<Candidate> },
}

impl<T> Resolution<T> {
    /// Converts a failed resolution into a terminal error for `kind`
    pub fn into_result(self, kind: EntityKind) -> Result<T, ResolveError> {
        match self {
            Resolution::Resolved(entity) => Ok(entity),
            Resolution::NotFound { reference, known } => Err(ResolveError::NotFound {
                kind,
                reference,
                known,
            }),
            Resolution::Ambiguous { reference, matches } => Err(ResolveError::Ambiguous {
                kind,
                reference,
                matches,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{} not found: \"{reference}\". {}", .kind.title(), not_found_detail(.kind, .known))]
    NotFound {
        kind: EntityKind,
        reference: String,
        known: Known,
    },

    #[error("Multiple {} match \"{reference}\": {}. Retry with an ID.", .kind.plural(), join_candidates(.matches))]
    Ambiguous {
        kind: EntityKind,
        reference: String,
        matches: Vec<Candidate>,
    },

    #[error(transparent)]
    Upstream(#[from] TrackerError),
}

fn accepted_forms(kind: &EntityKind) -> &'static str {
    match kind {
        EntityKind::User => "an ID, name, email, or display name",
        EntityKind::Team => "an ID, key, or name",
        EntityKind::Project | EntityKind::Roadmap => "an ID, slug ID, or exact name",
        EntityKind::WorkflowState => "an ID or name",
    }
}

fn not_found_detail(kind: &EntityKind, known: &Known) -> String {
    if known.is_empty() {
        format!("No {} exist. Provide {}.", kind.plural(), accepted_forms(kind))
    } else {
        format!(
            "Provide {}. Known {}: {}",
            accepted_forms(kind),
            kind.plural(),
            known
        )
    }
}

fn join_candidates(matches: &[Candidate]) -> String {
    matches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_is_bounded() {
        let known = Known::from_labels((0..25).map(|i| format!("team-{}", i)));
        assert_eq!(known.labels.len(), MAX_KNOWN_CANDIDATES);
        assert_eq!(known.omitted, 5);
        assert!(known.to_string().ends_with(", and 5 more"));
    }

    #[test]
    fn not_found_message_lists_known() {
        let resolution: Resolution<()> = Resolution::NotFound {
            reference: "zzz".to_string(),
            known: Known::from_labels(vec!["ENG (Engineering)".to_string()]),
        };
        let err = resolution.into_result(EntityKind::Team).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Team not found: \"zzz\"."));
        assert!(message.contains("Known teams: ENG (Engineering)"));
    }

    #[test]
    fn not_found_message_without_candidates() {
        let resolution: Resolution<()> = Resolution::NotFound {
            reference: "x".to_string(),
            known: Known::default(),
        };
        let message = resolution
            .into_result(EntityKind::Roadmap)
            .unwrap_err()
            .to_string();
        assert!(message.contains("No roadmaps exist"));
    }

    #[test]
    fn ambiguous_message_lists_every_match() {
        let resolution: Resolution<()> = Resolution::Ambiguous {
            reference: "bob".to_string(),
            matches: vec![
                Candidate {
                    id: "u1".to_string(),
                    label: "Bob A <bob.a@x.com>".to_string(),
                    matched: "displayName",
                },
                Candidate {
                    id: "u2".to_string(),
                    label: "Bob B <bob.b@x.com>".to_string(),
                    matched: "displayName",
                },
            ],
        };
        let message = resolution
            .into_result(EntityKind::User)
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("Multiple users match \"bob\""));
        assert!(message.contains("Bob A <bob.a@x.com> (id: u1, matched displayName)"));
        assert!(message.contains("Bob B <bob.b@x.com> (id: u2, matched displayName)"));
    }

    #[test]
    fn resolved_passes_through() {
        let resolution = Resolution::Resolved(7);
        assert_eq!(resolution.into_result(EntityKind::Team).unwrap(), 7);
    }
}

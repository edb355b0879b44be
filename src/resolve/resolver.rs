//! Per-kind identifier resolution
//!
//! Every resolver runs the same two phases:
//!
//! 1. Fetch the reference as a primary key. A hit is authoritative and
//!    nothing else is consulted.
//! 2. Only when the tracker reports "no such key", search the kind's
//!    alternate keys and classify the candidates (0, 1, or many).
//!
//! Alternate-key matching is case-insensitive equality. There is no
//! substring or fuzzy matching here; that belongs to the search commands.
//!
//! Roadmaps have no server-side filter, so their fallback fetches the whole
//! collection and filters locally. This is O(n) in the number of roadmaps.

use crate::domain::{
    collect_all, EntityKind, Filter, Project, Roadmap, Team, Tracker, TrackerError, User,
    WorkflowState,
};

use super::outcome::{Candidate, Known, Resolution};

/// An entity that can be looked up by its alternate keys
pub trait Resolvable {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Human-readable label shown in not-found and ambiguity messages
    fn label(&self) -> String;

    /// Wire name of the first alternate key equal to `reference`, ignoring case
    fn matched_key(&self, reference: &str) -> Option<&'static str>;
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Resolvable for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    fn matched_key(&self, reference: &str) -> Option<&'static str> {
        if eq_ignore_case(&self.name, reference) {
            Some("name")
        } else if eq_ignore_case(&self.email, reference) {
            Some("email")
        } else if self
            .display_name
            .as_deref()
            .is_some_and(|d| eq_ignore_case(d, reference))
        {
            Some("displayName")
        } else {
            None
        }
    }
}

impl Resolvable for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.key, self.name)
    }

    fn matched_key(&self, reference: &str) -> Option<&'static str> {
        if eq_ignore_case(&self.key, reference) {
            Some("key")
        } else if eq_ignore_case(&self.name, reference) {
            Some("name")
        } else {
            None
        }
    }
}

impl Resolvable for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.slug_id)
    }

    fn matched_key(&self, reference: &str) -> Option<&'static str> {
        if eq_ignore_case(&self.slug_id, reference) {
            Some("slugId")
        } else if eq_ignore_case(&self.name, reference) {
            Some("name")
        } else {
            None
        }
    }
}

impl Resolvable for Roadmap {
    const KIND: EntityKind = EntityKind::Roadmap;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.slug_id)
    }

    fn matched_key(&self, reference: &str) -> Option<&'static str> {
        if eq_ignore_case(&self.slug_id, reference) {
            Some("slugId")
        } else if eq_ignore_case(&self.name, reference) {
            Some("name")
        } else {
            None
        }
    }
}

impl Resolvable for WorkflowState {
    const KIND: EntityKind = EntityKind::WorkflowState;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn matched_key(&self, reference: &str) -> Option<&'static str> {
        eq_ignore_case(&self.name, reference).then_some("name")
    }
}

/// Runs the primary-key fetch. `Ok(None)` means "no such key, fall back".
fn fast_path<T>(fetched: Result<T, TrackerError>) -> Result<Option<T>, TrackerError> {
    match fetched {
        Ok(entity) => Ok(Some(entity)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Classifies a candidate set by local alternate-key equality
///
/// Candidates are re-checked here even when the tracker already filtered
/// them, so every match carries the key it matched on. `known` is only
/// evaluated when nothing matched.
fn classify<T, K>(reference: &str, candidates: Vec<T>, known: K) -> Result<Resolution<T>, TrackerError>
where
    T: Resolvable,
    K: FnOnce() -> Result<Vec<T>, TrackerError>,
{
    let mut matches: Vec<(T, &'static str)> = Vec::new();
    for candidate in candidates {
        if matches.iter().any(|(m, _)| m.id() == candidate.id()) {
            continue;
        }
        if let Some(key) = candidate.matched_key(reference) {
            matches.push((candidate, key));
        }
    }

    match matches.len() {
        0 => {
            let everything = known()?;
            Ok(Resolution::NotFound {
                reference: reference.to_string(),
                known: Known::from_labels(everything.iter().map(Resolvable::label)),
            })
        }
        1 => {
            let (entity, _) = matches.remove(0);
            Ok(Resolution::Resolved(entity))
        }
        _ => Ok(Resolution::Ambiguous {
            reference: reference.to_string(),
            matches: matches
                .iter()
                .map(|(entity, key)| Candidate {
                    id: entity.id().to_string(),
                    label: entity.label(),
                    matched: *key,
                })
                .collect(),
        }),
    }
}

/// Resolves a user by ID, name, email, or display name
pub fn resolve_user(tracker: &dyn Tracker, reference: &str) -> Result<Resolution<User>, TrackerError> {
    let reference = reference.trim();
    if let Some(user) = fast_path(tracker.user(reference))? {
        return Ok(Resolution::Resolved(user));
    }

    let everyone = collect_all(|page| tracker.users(&Filter::All, page))?;
    let known = everyone.clone();
    classify(reference, everyone, move || Ok(known))
}

/// Resolves a team by ID, key, or name
pub fn resolve_team(tracker: &dyn Tracker, reference: &str) -> Result<Resolution<Team>, TrackerError> {
    let reference = reference.trim();
    if let Some(team) = fast_path(tracker.team(reference))? {
        return Ok(Resolution::Resolved(team));
    }

    let filter = Filter::Exact(reference.to_string());
    let candidates = collect_all(|page| tracker.teams(&filter, page))?;
    classify(reference, candidates, || {
        collect_all(|page| tracker.teams(&Filter::All, page))
    })
}

/// Resolves a project by ID, slug ID, or exact name
pub fn resolve_project(
    tracker: &dyn Tracker,
    reference: &str,
) -> Result<Resolution<Project>, TrackerError> {
    let reference = reference.trim();
    if let Some(project) = fast_path(tracker.project(reference))? {
        return Ok(Resolution::Resolved(project));
    }

    let filter = Filter::Exact(reference.to_string());
    let candidates = collect_all(|page| tracker.projects(&filter, page))?;
    classify(reference, candidates, || {
        collect_all(|page| tracker.projects(&Filter::All, page))
    })
}

/// Resolves a roadmap by ID, slug ID, or exact name
pub fn resolve_roadmap(
    tracker: &dyn Tracker,
    reference: &str,
) -> Result<Resolution<Roadmap>, TrackerError> {
    let reference = reference.trim();
    if let Some(roadmap) = fast_path(tracker.roadmap(reference))? {
        return Ok(Resolution::Resolved(roadmap));
    }

    // No server-side filter for roadmaps: scan the full collection.
    let all = collect_all(|page| tracker.roadmaps(page))?;
    let known = all.clone();
    classify(reference, all, move || Ok(known))
}

/// Resolves a workflow state by ID, or by name within one team
pub fn resolve_workflow_state(
    tracker: &dyn Tracker,
    team_id: &str,
    reference: &str,
) -> Result<Resolution<WorkflowState>, TrackerError> {
    let reference = reference.trim();
    if let Some(state) = fast_path(tracker.workflow_state(reference))? {
        return Ok(Resolution::Resolved(state));
    }

    let filter = Filter::Exact(reference.to_string());
    let candidates = collect_all(|page| tracker.workflow_states(team_id, &filter, page))?;
    classify(reference, candidates, || {
        collect_all(|page| tracker.workflow_states(team_id, &Filter::All, page))
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::domain::{Page, PageRequest, ProjectScope};
    use crate::storage::{Snapshot, SnapshotTracker};

    /// Wraps a snapshot and counts alternate-key searches
    struct Counting {
        inner: SnapshotTracker,
        searches: Cell<usize>,
        fail_with: Option<String>,
    }

    impl Counting {
        fn new(snapshot: Snapshot) -> Self {
            Self {
                inner: SnapshotTracker::new(snapshot),
                searches: Cell::new(0),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::new(Snapshot::default())
            }
        }

        fn search<T>(&self, result: Result<Page<T>, TrackerError>) -> Result<Page<T>, TrackerError> {
            self.searches.set(self.searches.get() + 1);
            result
        }

        fn fetch<T>(&self, result: Result<T, TrackerError>) -> Result<T, TrackerError> {
            match &self.fail_with {
                Some(message) => Err(TrackerError::Upstream(message.clone())),
                None => result,
            }
        }
    }

    impl Tracker for Counting {
        fn user(&self, id: &str) -> Result<User, TrackerError> {
            self.fetch(self.inner.user(id))
        }
        fn users(&self, filter: &Filter, page: &PageRequest) -> Result<Page<User>, TrackerError> {
            self.search(self.inner.users(filter, page))
        }
        fn team_members(
            &self,
            team_id: &str,
            page: &PageRequest,
        ) -> Result<Page<User>, TrackerError> {
            self.search(self.inner.team_members(team_id, page))
        }
        fn team(&self, id: &str) -> Result<Team, TrackerError> {
            self.fetch(self.inner.team(id))
        }
        fn teams(&self, filter: &Filter, page: &PageRequest) -> Result<Page<Team>, TrackerError> {
            self.search(self.inner.teams(filter, page))
        }
        fn project(&self, id: &str) -> Result<Project, TrackerError> {
            self.fetch(self.inner.project(id))
        }
        fn projects(
            &self,
            filter: &Filter,
            page: &PageRequest,
        ) -> Result<Page<Project>, TrackerError> {
            self.search(self.inner.projects(filter, page))
        }
        fn scoped_projects(
            &self,
            scope: &ProjectScope,
            page: &PageRequest,
        ) -> Result<Page<Project>, TrackerError> {
            self.search(self.inner.scoped_projects(scope, page))
        }
        fn roadmap(&self, id: &str) -> Result<Roadmap, TrackerError> {
            self.fetch(self.inner.roadmap(id))
        }
        fn roadmaps(&self, page: &PageRequest) -> Result<Page<Roadmap>, TrackerError> {
            self.search(self.inner.roadmaps(page))
        }
        fn roadmap_projects(
            &self,
            roadmap_id: &str,
            page: &PageRequest,
        ) -> Result<Page<Project>, TrackerError> {
            self.search(self.inner.roadmap_projects(roadmap_id, page))
        }
        fn workflow_state(&self, id: &str) -> Result<WorkflowState, TrackerError> {
            self.fetch(self.inner.workflow_state(id))
        }
        fn workflow_states(
            &self,
            team_id: &str,
            filter: &Filter,
            page: &PageRequest,
        ) -> Result<Page<WorkflowState>, TrackerError> {
            self.search(self.inner.workflow_states(team_id, filter, page))
        }
    }

    fn user(id: &str, name: &str, email: &str, display: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            display_name: display.map(str::to_string),
            active: true,
            team_ids: Vec::new(),
        }
    }

    fn team(id: &str, key: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            key: key.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    fn project(id: &str, slug: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            slug_id: slug.to_string(),
            name: name.to_string(),
            description: None,
            content: None,
            state: None,
            progress: None,
            lead: None,
            start_date: None,
            target_date: None,
            url: None,
            team_ids: Vec::new(),
            roadmap_ids: Vec::new(),
        }
    }

    fn roadmap(id: &str, slug: &str, name: &str) -> Roadmap {
        Roadmap {
            id: id.to_string(),
            slug_id: slug.to_string(),
            name: name.to_string(),
            description: None,
            owner: None,
            created_at: None,
            url: None,
        }
    }

    fn state(id: &str, name: &str, team_id: &str) -> WorkflowState {
        WorkflowState {
            id: id.to_string(),
            name: name.to_string(),
            state_type: "started".to_string(),
            color: None,
            position: 0.0,
            team_id: team_id.to_string(),
        }
    }

    fn bobs() -> Snapshot {
        Snapshot {
            users: vec![
                user("u1", "Bob A", "bob.a@x.com", Some("bob")),
                user("u2", "Bob B", "bob.b@x.com", Some("Bob")),
                user("u3", "Carol", "carol@x.com", None),
            ],
            ..Snapshot::default()
        }
    }

    fn workspace() -> Snapshot {
        Snapshot {
            users: bobs().users,
            teams: vec![team("t1", "ENG", "Engineering"), team("t2", "DES", "Design")],
            projects: vec![
                project("p1", "apollo-1a2b", "Apollo"),
                project("p2", "gemini-3c4d", "Gemini"),
                project("p3", "gemini-5e6f", "gemini"),
            ],
            roadmaps: vec![roadmap("r1", "q3-7a8b", "Q3 Plan"), roadmap("r2", "q4-9c0d", "Q4 Plan")],
            workflow_states: vec![
                state("s1", "In Progress", "t1"),
                state("s2", "In Progress", "t2"),
                state("s3", "Done", "t1"),
            ],
        }
    }

    #[test]
    fn primary_key_skips_fallback_for_every_kind() {
        let tracker = Counting::new(workspace());

        assert!(matches!(resolve_user(&tracker, "u1").unwrap(), Resolution::Resolved(_)));
        assert!(matches!(resolve_team(&tracker, "t1").unwrap(), Resolution::Resolved(_)));
        assert!(matches!(resolve_project(&tracker, "p1").unwrap(), Resolution::Resolved(_)));
        assert!(matches!(resolve_roadmap(&tracker, "r1").unwrap(), Resolution::Resolved(_)));
        assert!(matches!(
            resolve_workflow_state(&tracker, "t1", "s3").unwrap(),
            Resolution::Resolved(_)
        ));

        assert_eq!(tracker.searches.get(), 0);
    }

    #[test]
    fn id_wins_over_matching_name() {
        let mut snapshot = workspace();
        snapshot.teams.push(team("ENG", "OPS", "Operations"));
        let tracker = Counting::new(snapshot);

        let resolution = resolve_team(&tracker, "ENG").unwrap();
        match resolution {
            Resolution::Resolved(t) => assert_eq!(t.key, "OPS"),
            other => panic!("expected resolved, got {:?}", other),
        }
        assert_eq!(tracker.searches.get(), 0);
    }

    #[test]
    fn team_by_key() {
        let tracker = Counting::new(Snapshot {
            teams: vec![team("t1", "ENG", "Engineering")],
            ..Snapshot::default()
        });

        let resolution = resolve_team(&tracker, "ENG").unwrap();
        assert_eq!(resolution, Resolution::Resolved(team("t1", "ENG", "Engineering")));
    }

    #[test]
    fn team_by_name_ignores_case() {
        let tracker = Counting::new(workspace());
        match resolve_team(&tracker, "design").unwrap() {
            Resolution::Resolved(t) => assert_eq!(t.id, "t2"),
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn team_not_found_lists_all_teams() {
        let tracker = Counting::new(workspace());
        match resolve_team(&tracker, "zzz").unwrap() {
            Resolution::NotFound { reference, known } => {
                assert_eq!(reference, "zzz");
                assert_eq!(known.labels, vec!["ENG (Engineering)", "DES (Design)"]);
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn team_prefix_does_not_match() {
        let tracker = Counting::new(workspace());
        let resolution = resolve_team(&tracker, "EN").unwrap();
        assert!(matches!(resolution, Resolution::NotFound { .. }));
    }

    #[test]
    fn user_display_name_shared_is_ambiguous() {
        let tracker = Counting::new(bobs());
        match resolve_user(&tracker, "Bob").unwrap() {
            Resolution::Ambiguous { matches, .. } => {
                let ids: Vec<_> = matches.iter().map(|c| c.id.as_str()).collect();
                assert_eq!(ids, vec!["u1", "u2"]);
                assert!(matches.iter().all(|c| c.matched == "displayName"));
                assert_eq!(matches[0].label, "Bob A <bob.a@x.com>");
            }
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn user_name_prefix_is_not_a_match() {
        // Names "Bob A" and "Bob B" with no display names: "Bob" equals no key.
        let tracker = Counting::new(Snapshot {
            users: vec![
                user("u1", "Bob A", "bob.a@x.com", None),
                user("u2", "Bob B", "bob.b@x.com", None),
            ],
            ..Snapshot::default()
        });
        match resolve_user(&tracker, "Bob").unwrap() {
            Resolution::NotFound { reference, known } => {
                assert_eq!(reference, "Bob");
                assert_eq!(
                    known.labels,
                    vec!["Bob A <bob.a@x.com>", "Bob B <bob.b@x.com>"]
                );
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn user_not_found_lists_name_and_email() {
        let tracker = Counting::new(bobs());
        match resolve_user(&tracker, "zzz").unwrap() {
            Resolution::NotFound { known, .. } => {
                assert!(known.labels.contains(&"Bob A <bob.a@x.com>".to_string()));
                assert!(known.labels.contains(&"Bob B <bob.b@x.com>".to_string()));
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn user_by_email_ignores_case() {
        let tracker = Counting::new(bobs());
        match resolve_user(&tracker, "CAROL@x.com").unwrap() {
            Resolution::Resolved(u) => assert_eq!(u.id, "u3"),
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn user_matching_several_fields_counts_once() {
        let tracker = Counting::new(Snapshot {
            users: vec![user("u9", "dana", "dana", Some("Dana"))],
            ..Snapshot::default()
        });
        match resolve_user(&tracker, "DANA").unwrap() {
            Resolution::Resolved(u) => assert_eq!(u.id, "u9"),
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn ambiguous_reports_first_matching_field() {
        let tracker = Counting::new(Snapshot {
            users: vec![
                user("u1", "sam", "sam@x.com", None),
                user("u2", "Samuel", "s@x.com", Some("Sam")),
            ],
            ..Snapshot::default()
        });
        match resolve_user(&tracker, "sam").unwrap() {
            Resolution::Ambiguous { matches, .. } => {
                assert_eq!(matches[0].matched, "name");
                assert_eq!(matches[1].matched, "displayName");
            }
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn project_by_slug_and_name() {
        let tracker = Counting::new(workspace());
        match resolve_project(&tracker, "APOLLO-1A2B").unwrap() {
            Resolution::Resolved(p) => assert_eq!(p.id, "p1"),
            other => panic!("expected resolved, got {:?}", other),
        }
        match resolve_project(&tracker, "Gemini").unwrap() {
            Resolution::Ambiguous { matches, .. } => assert_eq!(matches.len(), 2),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn roadmap_fallback_scans_everything() {
        let tracker = Counting::new(workspace());
        match resolve_roadmap(&tracker, "q4 plan").unwrap() {
            Resolution::Resolved(r) => assert_eq!(r.id, "r2"),
            other => panic!("expected resolved, got {:?}", other),
        }
        assert_eq!(tracker.searches.get(), 1);

        match resolve_roadmap(&tracker, "Q5").unwrap() {
            Resolution::NotFound { known, .. } => {
                assert_eq!(known.labels, vec!["Q3 Plan (q3-7a8b)", "Q4 Plan (q4-9c0d)"]);
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn workflow_state_is_scoped_to_team() {
        let tracker = Counting::new(workspace());
        match resolve_workflow_state(&tracker, "t2", "in progress").unwrap() {
            Resolution::Resolved(s) => assert_eq!(s.id, "s2"),
            other => panic!("expected resolved, got {:?}", other),
        }
        match resolve_workflow_state(&tracker, "t2", "Done").unwrap() {
            Resolution::NotFound { known, .. } => assert_eq!(known.labels, vec!["In Progress"]),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn upstream_errors_pass_through() {
        let tracker = Counting::failing("401 Unauthorized");
        let err = resolve_team(&tracker, "ENG").unwrap_err();
        assert_eq!(err.to_string(), "401 Unauthorized");
        assert_eq!(tracker.searches.get(), 0);
    }

    #[test]
    fn no_candidates_at_all() {
        let tracker = Counting::new(Snapshot::default());
        match resolve_team(&tracker, "ENG").unwrap() {
            Resolution::NotFound { known, .. } => assert!(known.is_empty()),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}

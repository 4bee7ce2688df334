//! In-process workspace and the id-allocation collaborator contract.
//!
//! Artifact persistence, hierarchy validation rules, and git/PR
//! orchestration live in external services. [`Workspace`] is the
//! in-memory materialization of a snapshot those services produce,
//! enough for the presentation layer to render and for the creation
//! wizard to allocate ids and append records.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use cairn_shared::{
    ArtifactId, ArtifactRecord, CairnError, EventKind, EventRecord, ROOT_KEY, Result,
    WorkspaceData,
};

/// Allocate the next child id under `parent` (or the next top-level id
/// when `parent` is `None`).
///
/// Scans existing siblings for the largest numeric last segment and
/// returns that plus one, starting at 1. Siblings with non-numeric last
/// segments are ignored.
pub fn next_child_id(records: &[ArtifactRecord], parent: Option<&ArtifactId>) -> ArtifactId {
    let parent_key = parent.map_or(ROOT_KEY.to_string(), ArtifactId::to_string);

    let max_seq = records
        .iter()
        .filter(|r| r.id.parent_key() == parent_key)
        .filter_map(|r| r.id.last_segment().parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    let seq = max_seq + 1;
    match parent {
        Some(parent) => parent.child(seq),
        None => ArtifactId::from(seq),
    }
}

/// An in-memory workspace snapshot.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    data: WorkspaceData,
}

impl Workspace {
    pub fn new(data: WorkspaceData) -> Self {
        Self { data }
    }

    /// Flat artifact records, in snapshot order.
    pub fn artifacts(&self) -> &[ArtifactRecord] {
        &self.data.artifacts
    }

    /// Lifecycle event log, in snapshot order.
    pub fn events(&self) -> &[EventRecord] {
        &self.data.events
    }

    /// The underlying snapshot.
    pub fn data(&self) -> &WorkspaceData {
        &self.data
    }

    /// Create a new artifact under `parent`, allocating its id and
    /// recording an `artifact_created` event stamped at `at`.
    ///
    /// The parent, when given, must exist in the snapshot — creating
    /// under a missing parent would produce an orphan the tree never
    /// renders.
    pub fn create_artifact(
        &mut self,
        parent: Option<&ArtifactId>,
        title: &str,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<ArtifactId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CairnError::validation("artifact title must not be empty"));
        }

        if let Some(parent) = parent {
            if !self.data.artifacts.iter().any(|r| &r.id == parent) {
                return Err(CairnError::Workspace(format!(
                    "parent '{parent}' not found in workspace"
                )));
            }
        }

        let id = next_child_id(&self.data.artifacts, parent);
        debug!(%id, kind = %id.kind(), "allocated artifact id");

        self.data
            .artifacts
            .push(ArtifactRecord::new(id.clone(), title));
        self.data.events.push(EventRecord::new(
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
            EventKind::ArtifactCreated,
            actor,
        ));

        info!(%id, title, "artifact created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, title: &str) -> ArtifactRecord {
        ArtifactRecord::new(id.parse::<ArtifactId>().unwrap(), title)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn allocates_first_top_level_id() {
        assert_eq!(next_child_id(&[], None).to_string(), "1");
    }

    #[test]
    fn allocates_after_max_sibling() {
        let records = vec![record("1", "A"), record("3", "B"), record("2", "C")];
        assert_eq!(next_child_id(&records, None).to_string(), "4");
    }

    #[test]
    fn allocates_under_parent() {
        let records = vec![record("2", "A"), record("2.1", "B"), record("2.2", "C")];
        let parent: ArtifactId = "2".parse().unwrap();
        assert_eq!(next_child_id(&records, Some(&parent)).to_string(), "2.3");
    }

    #[test]
    fn ignores_non_numeric_siblings() {
        let records = vec![record("2", "A"), record("2.legacy", "B")];
        let parent: ArtifactId = "2".parse().unwrap();
        assert_eq!(next_child_id(&records, Some(&parent)).to_string(), "2.1");
    }

    #[test]
    fn create_artifact_appends_record_and_event() {
        let mut ws = Workspace::new(WorkspaceData {
            artifacts: vec![record("1", "Platform")],
            ..Default::default()
        });

        let parent: ArtifactId = "1".parse().unwrap();
        let id = ws
            .create_artifact(Some(&parent), "Auth", "alice", fixed_now())
            .expect("create");

        assert_eq!(id.to_string(), "1.1");
        assert_eq!(ws.artifacts().len(), 2);
        assert_eq!(ws.events().len(), 1);
        assert_eq!(ws.events()[0].event, EventKind::ArtifactCreated);
        assert_eq!(ws.events()[0].timestamp, "2025-01-10T12:00:00Z");
    }

    #[test]
    fn create_artifact_rejects_missing_parent() {
        let mut ws = Workspace::default();
        let parent: ArtifactId = "9".parse().unwrap();

        let err = ws
            .create_artifact(Some(&parent), "Ghost", "alice", fixed_now())
            .unwrap_err();
        assert!(matches!(err, CairnError::Workspace(_)));
    }

    #[test]
    fn create_artifact_rejects_blank_title() {
        let mut ws = Workspace::default();
        let err = ws
            .create_artifact(None, "   ", "alice", fixed_now())
            .unwrap_err();
        assert!(matches!(err, CairnError::Validation { .. }));
    }
}

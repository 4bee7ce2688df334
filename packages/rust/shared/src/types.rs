//! Core domain types for cairn work artifacts.

use serde::{Deserialize, Serialize};

use crate::error::{CairnError, Result};

/// Current schema version for the workspace snapshot format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Synthetic parent key under which all top-level artifacts group.
pub const ROOT_KEY: &str = "root";

// ---------------------------------------------------------------------------
// ArtifactId
// ---------------------------------------------------------------------------

/// A dot-segmented artifact identifier encoding hierarchy position.
///
/// One segment is an initiative (`"3"`), two a milestone (`"3.2"`),
/// three or more an issue (`"3.2.1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dot-separated segments of the id.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The last dot-segment.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// The parent key: the id minus its last segment, or [`ROOT_KEY`]
    /// for single-segment ids.
    pub fn parent_key(&self) -> String {
        match self.0.rsplit_once('.') {
            Some((parent, _)) => parent.to_string(),
            None => ROOT_KEY.to_string(),
        }
    }

    /// The parent id, or `None` for single-segment ids.
    pub fn parent(&self) -> Option<ArtifactId> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| ArtifactId(parent.to_string()))
    }

    /// Derive the artifact kind from the segment count.
    ///
    /// The kind is always computed from the id shape; it is never a
    /// stored field that could disagree with the id.
    pub fn kind(&self) -> ArtifactKind {
        match self.segments().count() {
            1 => ArtifactKind::Initiative,
            2 => ArtifactKind::Milestone,
            _ => ArtifactKind::Issue,
        }
    }

    /// Build a child id by appending a numeric segment.
    pub fn child(&self, seq: u32) -> ArtifactId {
        ArtifactId(format!("{}.{seq}", self.0))
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ArtifactId {
    type Err = CairnError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CairnError::validation("artifact id must not be empty"));
        }
        if s.split('.').any(str::is_empty) {
            return Err(CairnError::validation(format!(
                "artifact id '{s}' has an empty segment"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<u32> for ArtifactId {
    fn from(seq: u32) -> Self {
        Self(seq.to_string())
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// The three hierarchy levels, determined by id segment count (1 / 2 / 3+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Initiative,
    Milestone,
    Issue,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiative => write!(f, "initiative"),
            Self::Milestone => write!(f, "milestone"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactRecord
// ---------------------------------------------------------------------------

/// A single tracked unit of work as supplied by the artifact collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Dot-segmented identifier.
    pub id: ArtifactId,
    /// Display title, semantically opaque.
    pub title: String,
}

impl ArtifactRecord {
    pub fn new(id: ArtifactId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Lifecycle states and workflow triggers that can appear on a timeline.
///
/// Unknown tokens deserialize to [`EventKind::Other`] so that the
/// "unrecognized token → fallback presentation" path stays a single
/// code path rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Draft,
    ArtifactCreated,
    Ready,
    Blocked,
    InProgress,
    BranchCreated,
    InReview,
    PrReady,
    PrMerged,
    Completed,
    Cancelled,
    Archived,
    /// Any token outside the closed vocabulary.
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    /// The snake_case wire token for this event.
    pub fn token(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::ArtifactCreated => "artifact_created",
            Self::Ready => "ready",
            Self::Blocked => "blocked",
            Self::InProgress => "in_progress",
            Self::BranchCreated => "branch_created",
            Self::InReview => "in_review",
            Self::PrReady => "pr_ready",
            Self::PrMerged => "pr_merged",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Archived => "archived",
            Self::Other(token) => token,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

// ---------------------------------------------------------------------------
// EventRecord
// ---------------------------------------------------------------------------

/// A timestamped lifecycle fact as supplied by the query collaborator.
///
/// The timestamp is kept as the raw ISO-8601 string; the timeline
/// formatter parses it and surfaces a validation error on bad input
/// rather than silently mis-sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// ISO-8601 instant.
    pub timestamp: String,
    /// Lifecycle state or workflow trigger token.
    pub event: EventKind,
    /// Who or what produced the event.
    pub actor: String,
}

impl EventRecord {
    pub fn new(
        timestamp: impl Into<String>,
        event: EventKind,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            event,
            actor: actor.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkspaceData
// ---------------------------------------------------------------------------

/// The JSON snapshot the external artifact/query collaborators
/// materialize for the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceData {
    /// Schema version for forward compatibility.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Flat list of artifact records.
    #[serde(default)]
    pub artifacts: Vec<ArtifactRecord>,
    /// Lifecycle event log.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_id_roundtrip() {
        let id: ArtifactId = "3.2.1".parse().expect("parse ArtifactId");
        assert_eq!(id.to_string(), "3.2.1");
        assert_eq!(id.segments().count(), 3);
    }

    #[test]
    fn artifact_id_rejects_malformed() {
        assert!("".parse::<ArtifactId>().is_err());
        assert!("1..2".parse::<ArtifactId>().is_err());
        assert!(".1".parse::<ArtifactId>().is_err());
        assert!("1.".parse::<ArtifactId>().is_err());
    }

    #[test]
    fn kind_derived_from_segment_count() {
        let init: ArtifactId = "7".parse().unwrap();
        let mile: ArtifactId = "7.1".parse().unwrap();
        let issue: ArtifactId = "7.1.4".parse().unwrap();
        let deep: ArtifactId = "7.1.4.2".parse().unwrap();

        assert_eq!(init.kind(), ArtifactKind::Initiative);
        assert_eq!(mile.kind(), ArtifactKind::Milestone);
        assert_eq!(issue.kind(), ArtifactKind::Issue);
        // 3+ segments is always an issue
        assert_eq!(deep.kind(), ArtifactKind::Issue);
    }

    #[test]
    fn parent_key_strips_last_segment() {
        let id: ArtifactId = "3.2.1".parse().unwrap();
        assert_eq!(id.parent_key(), "3.2");
        assert_eq!(id.parent().unwrap().to_string(), "3.2");

        let root: ArtifactId = "3".parse().unwrap();
        assert_eq!(root.parent_key(), ROOT_KEY);
        assert!(root.parent().is_none());
    }

    #[test]
    fn event_kind_token_roundtrip() {
        let kind: EventKind = serde_json::from_str("\"pr_merged\"").expect("deserialize");
        assert_eq!(kind, EventKind::PrMerged);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"pr_merged\"");
    }

    #[test]
    fn event_kind_unknown_token_falls_back() {
        let kind: EventKind = serde_json::from_str("\"reopened\"").expect("deserialize");
        assert_eq!(kind, EventKind::Other("reopened".into()));
        assert_eq!(kind.token(), "reopened");
    }

    #[test]
    fn workspace_data_serialization() {
        let data = WorkspaceData {
            schema_version: CURRENT_SCHEMA_VERSION,
            artifacts: vec![ArtifactRecord::new("1".parse().unwrap(), "Ship v1")],
            events: vec![EventRecord::new(
                "2025-01-01T00:00:00Z",
                EventKind::Draft,
                "alice",
            )],
        };

        let json = serde_json::to_string_pretty(&data).expect("serialize");
        let parsed: WorkspaceData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.artifacts.len(), 1);
        assert_eq!(parsed.events[0].event, EventKind::Draft);
    }

    #[test]
    fn workspace_data_defaults_missing_fields() {
        let parsed: WorkspaceData = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(parsed.artifacts.is_empty());
        assert!(parsed.events.is_empty());
    }
}

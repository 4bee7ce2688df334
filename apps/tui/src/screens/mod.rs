//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

pub(crate) mod create_artifact;
pub(crate) mod hierarchy;
pub(crate) mod timeline;

use std::fmt;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Hierarchy,
    Timeline,
    NewArtifact,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hierarchy => write!(f, "Hierarchy"),
            Self::Timeline => write!(f, "Timeline"),
            Self::NewArtifact => write!(f, "New Artifact"),
        }
    }
}

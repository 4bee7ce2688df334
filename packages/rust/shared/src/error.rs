//! Error types for cairn.
//!
//! Library crates use [`CairnError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all cairn operations.
#[derive(Debug, thiserror::Error)]
pub enum CairnError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (malformed id, bad timestamp, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Workspace snapshot loading or update error.
    #[error("workspace error: {0}")]
    Workspace(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CairnError>;

impl CairnError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CairnError::config("missing workspace file");
        assert_eq!(err.to_string(), "config error: missing workspace file");

        let err = CairnError::validation("id '1..2' has an empty segment");
        assert!(err.to_string().contains("empty segment"));
    }
}

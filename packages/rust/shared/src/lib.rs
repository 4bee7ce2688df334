//! Shared types, error model, and configuration for cairn.
//!
//! This crate is the foundation depended on by all other cairn crates.
//! It provides:
//! - [`CairnError`] — the unified error type
//! - Domain types ([`ArtifactId`], [`ArtifactRecord`], [`EventRecord`], [`WorkspaceData`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, WorkspaceRegistryEntry, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{CairnError, Result};
pub use types::{
    ArtifactId, ArtifactKind, ArtifactRecord, CURRENT_SCHEMA_VERSION, EventKind, EventRecord,
    ROOT_KEY, WorkspaceData,
};

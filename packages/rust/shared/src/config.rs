//! Application configuration for cairn.
//!
//! User config lives at `~/.cairn/cairn.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CairnError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "cairn.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".cairn";

// ---------------------------------------------------------------------------
// Config structs (matching cairn.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Registered workspaces.
    #[serde(default)]
    pub workspaces: Vec<WorkspaceRegistryEntry>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default workspace snapshot file.
    #[serde(default = "default_workspace_file")]
    pub workspace_file: String,

    /// Maximum events shown on the timeline.
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Actor recorded for artifacts created from this machine.
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            workspace_file: default_workspace_file(),
            max_events: default_max_events(),
            actor: default_actor(),
        }
    }
}

fn default_workspace_file() -> String {
    "~/cairn/workspace.json".into()
}
fn default_max_events() -> usize {
    5
}
fn default_actor() -> String {
    "cairn".into()
}

/// `[[workspaces]]` entry — a registered workspace in the config registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRegistryEntry {
    /// Human-readable name.
    pub name: String,
    /// Path to the workspace snapshot file on disk.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.cairn/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CairnError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.cairn/cairn.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CairnError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CairnError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CairnError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config).map_err(|e| CairnError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CairnError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("workspace_file"));
        assert!(toml_str.contains("max_events"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.max_events, 5);
        assert_eq!(parsed.defaults.actor, "cairn");
    }

    #[test]
    fn config_with_workspaces() {
        let toml_str = r#"
[defaults]
max_events = 10

[[workspaces]]
name = "platform"
path = "/tmp/cairn/platform.json"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.max_events, 10);
        assert_eq!(config.workspaces.len(), 1);
        assert_eq!(config.workspaces[0].name, "platform");
    }
}

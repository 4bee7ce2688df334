//! cairn TUI — interactive terminal interface for work hierarchies.
//!
//! Provides screens for browsing the artifact hierarchy, the lifecycle
//! event timeline, and a guided creation wizard, built with `ratatui`
//! + `crossterm`.

mod app;
mod screens;
mod widgets;

use std::path::PathBuf;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = cairn_shared::load_config()?;
    let workspace_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.defaults.workspace_file.clone());

    app::run(PathBuf::from(workspace_file), config)
}

//! cairn CLI — terminal front end for structured work hierarchies.
//!
//! Renders artifact hierarchy trees and lifecycle event timelines from
//! workspace snapshots produced by the artifact/query services.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}

//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};

use cairn_core::hierarchy::build_tree;
use cairn_core::timeline::format_timeline;
use cairn_shared::{AppConfig, WorkspaceData, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// cairn — structured work hierarchies in the terminal.
#[derive(Parser)]
#[command(
    name = "cairn",
    version,
    about = "Render artifact hierarchies and lifecycle timelines from workspace snapshots.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the artifact hierarchy tree from a workspace snapshot.
    Tree {
        /// Workspace snapshot JSON file.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Render the lifecycle event timeline from a workspace snapshot.
    Timeline {
        /// Workspace snapshot JSON file.
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum events shown (defaults to the config value, then 5).
        #[arg(long)]
        max: Option<usize>,

        /// Reference instant (RFC 3339); defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },

    /// Launch the interactive TUI.
    Tui,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "cairn=info",
        1 => "cairn=debug",
        _ => "cairn=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tree { input } => cmd_tree(&input),
        Command::Timeline { input, max, now } => cmd_timeline(&input, max, now.as_deref()),
        Command::Tui => cmd_tui(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Load a workspace snapshot from a JSON file.
fn load_snapshot(path: &Path) -> Result<WorkspaceData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| eyre!("cannot read snapshot '{}': {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| eyre!("cannot parse snapshot '{}': {e}", path.display()))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_tree(input: &Path) -> Result<()> {
    let snapshot = load_snapshot(input)?;
    info!(
        artifacts = snapshot.artifacts.len(),
        "rendering hierarchy tree"
    );

    match build_tree(&snapshot.artifacts) {
        Some(tree) => {
            for line in tree.to_lines() {
                println!("{line}");
            }
        }
        None => println!("No artifacts in '{}'.", input.display()),
    }

    Ok(())
}

fn cmd_timeline(input: &Path, max: Option<usize>, now: Option<&str>) -> Result<()> {
    let snapshot = load_snapshot(input)?;
    let config = load_config()?;

    let max_events = max.unwrap_or(config.defaults.max_events.max(1));

    // The formatter requires an explicit reference instant; the live
    // clock is applied only here, at the outermost boundary.
    let now: DateTime<Utc> = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| eyre!("invalid --now '{raw}': {e}"))?,
        None => Utc::now(),
    };

    info!(
        events = snapshot.events.len(),
        max_events, "rendering timeline"
    );

    let rows = format_timeline(&snapshot.events, max_events, now)?;
    for row in &rows {
        println!("{}", row.to_text());
    }

    Ok(())
}

fn cmd_tui() -> Result<()> {
    // The TUI lives in its own binary so this crate stays terminal-free.
    println!("Run `cairn-tui` to launch the interactive interface.");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

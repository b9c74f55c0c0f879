//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Armband navigator - browse menus by tilting your forearm
#[derive(Parser, Debug)]
#[command(
    name = "armband-nav",
    author,
    version,
    about = "Tilt-driven menu navigator for a gesture armband",
    long_about = "Reads orientation and pose events from an armband (or a recording / \n\
                  built-in demo), drives the menu navigator and gesture recorder once \n\
                  per tick, and sends haptic feedback back to the device."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ARMBAND_NAV_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "ARMBAND_NAV_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a navigation session
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "ARMBAND_NAV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Replay a JSON Lines recording instead of the built-in demo
    #[arg(long, env = "ARMBAND_NAV_REPLAY")]
    pub replay: Option<PathBuf>,

    /// Record every tick's events to a JSON Lines file
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Stop after this many ticks (0 = until the source ends)
    #[arg(long, default_value = "0", env = "ARMBAND_NAV_MAX_TICKS")]
    pub max_ticks: u64,

    /// Override the tick period from configuration (milliseconds)
    #[arg(long, env = "ARMBAND_NAV_TICK_MS")]
    pub tick_ms: Option<u64>,

    /// Do not wait between ticks
    #[arg(long)]
    pub fast: bool,

    /// Start a gesture capture on the first tick
    #[arg(long)]
    pub capture: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ARMBAND_NAV_METRICS_PORT")]
    pub metrics_port: u16,

    /// Do not draw the status line
    #[arg(long)]
    pub no_render: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "armband.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "armband.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List every menu item
    #[arg(long)]
    pub items: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

//! CLI argument definitions for the region patcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use urn_cli::settings::DEFAULT_WORLDSPACE;

#[derive(Parser)]
#[command(
    name = "urn-patcher",
    version,
    about = "Unique Region Names patcher - add map regions to exterior cells",
    long_about = "Resolve the map regions covering every exterior cell of a worldspace\n\
                  and write cell overrides that list the missing ones.\n\n\
                  Reads a JSON plugin snapshot and writes the patch as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Patch the exterior cells of a worldspace.
    Patch(PatchArgs),

    /// List the regions of a worldspace with their indexed coverage.
    Regions(RegionsArgs),

    /// Show the regions covering one grid point.
    Lookup(LookupArgs),
}

#[derive(Parser)]
pub struct PatchArgs {
    /// Path to the JSON plugin snapshot.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Settings file (TOML). Missing files fall back to defaults.
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Target worldspace form key or editor id (overrides settings).
    #[arg(long = "worldspace", value_name = "ID")]
    pub worldspace: Option<String>,

    /// Output file (default: <output_name>.json next to the snapshot).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report what would change without writing the patch.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Index region areas even where they fall outside the worldspace bounds.
    #[arg(long = "no-clip")]
    pub no_clip: bool,
}

#[derive(Parser)]
pub struct RegionsArgs {
    /// Path to the JSON plugin snapshot.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Worldspace form key or editor id.
    #[arg(long = "worldspace", value_name = "ID", default_value = DEFAULT_WORLDSPACE)]
    pub worldspace: String,

    /// Index region areas even where they fall outside the worldspace bounds.
    #[arg(long = "no-clip")]
    pub no_clip: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Path to the JSON plugin snapshot.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    #[arg(value_name = "X", allow_negative_numbers = true)]
    pub x: i32,

    #[arg(value_name = "Y", allow_negative_numbers = true)]
    pub y: i32,

    /// Worldspace form key or editor id.
    #[arg(long = "worldspace", value_name = "ID", default_value = DEFAULT_WORLDSPACE)]
    pub worldspace: String,

    /// Index region areas even where they fall outside the worldspace bounds.
    #[arg(long = "no-clip")]
    pub no_clip: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

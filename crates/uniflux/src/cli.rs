//! Clap derive structures for the `uniflux` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// uniflux -- UniFi device telemetry as time-series points
#[derive(Debug, Parser)]
#[command(
    name = "uniflux",
    version,
    about = "Poll a UniFi controller and print device telemetry as time-series points",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Controller URL (overrides config)
    #[arg(long, short = 'c', global = true)]
    pub controller: Option<String>,

    /// Site short name (overrides config)
    #[arg(long, short = 's', global = true)]
    pub site: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON document per line
    Json,
    /// Pretty-printed JSON
    Pretty,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, fetch every device once and print its series
    Poll,

    /// Project a saved `stat/device` response without contacting a controller
    Decode(DecodeArgs),

    /// Decode a geo-IP lookup document
    Geo(GeoArgs),
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// JSON file: a `{meta, data}` envelope, a device array or one device
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct GeoArgs {
    /// JSON file holding one geo-IP object, or `[]`
    pub file: PathBuf,
}

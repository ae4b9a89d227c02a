//! CLI argument definitions for the reconciliation pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "finrec",
    version,
    about = "Financial reconciliation - reconcile the movement ledger against receipt feeds",
    long_about = "Reconcile warehouse movement records (PKRD) against the NFSI Fresh,\n\
                  NFSI Frozen and Non-NFSI receipt feeds, surfacing quantity and value\n\
                  variance with goods-in-transit classification and summary roll-ups."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
    /// Run a full reconciliation over one input snapshot.
    Run(RunArgs),

    /// List the configured source-to-column mappings.
    Sources,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the PKRD movement ledger extract.
    #[arg(long, value_name = "PATH")]
    pub pkrd: PathBuf,

    /// Path to the sales-order extract (join bridge).
    #[arg(long, value_name = "PATH")]
    pub sales: PathBuf,

    /// Path to the transfer-pricing reference extract.
    #[arg(long, value_name = "PATH")]
    pub pricing: PathBuf,

    /// Path to the depot reference extract.
    #[arg(long, value_name = "PATH")]
    pub depot: PathBuf,

    /// Path to the NFSI Fresh receipt extract.
    #[arg(long, value_name = "PATH")]
    pub fresh: PathBuf,

    /// Path to the NFSI Frozen receipt extract.
    #[arg(long, value_name = "PATH")]
    pub frozen: PathBuf,

    /// Path to the Non-NFSI invoice extract.
    #[arg(long = "non-nfsi", value_name = "PATH")]
    pub non_nfsi: PathBuf,

    /// Optional reporting window start (dd/mm/yyyy, inclusive).
    #[arg(long = "start-date", value_name = "DATE")]
    pub start_date: Option<String>,

    /// Optional reporting window end (dd/mm/yyyy, inclusive).
    #[arg(long = "end-date", value_name = "DATE")]
    pub end_date: Option<String>,

    /// Effective date stamped on reporting sets (dd/mm/yyyy, default today).
    #[arg(long = "effective-date", value_name = "DATE")]
    pub effective_date: Option<String>,

    /// Write result sets as CSV files into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON column-mapping override (default: compiled-in mappings).
    #[arg(long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,
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

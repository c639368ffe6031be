//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy table sink CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-table-sink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Job property override, e.g. `-D output.table=events` (repeatable)
    #[arg(short = 'D', long = "set", global = true, value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the job configuration
    Validate,

    /// Write key/value pairs from a typed-bytes file to the output table
    Write {
        /// Typed-bytes input file (`-` for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory the file store writes `<table>.jsonl` into
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Task name used in logs
        #[arg(long, default_value = "cli-task")]
        task: String,
    },

    /// Print key/value pairs from a typed-bytes file
    Inspect {
        /// Typed-bytes input file (`-` for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum pairs to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

//! Command-line interface wiring for the `srecasm` binary.
//!
//! This module owns the clap definitions, logging setup and the I/O glue around
//! the library encoders.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod common;
pub mod encode;
pub mod utils;

use common::FormatArg;

/// Parsed CLI entrypoint for the `srecasm` binary.
#[derive(Parser, Debug)]
#[command(
    name = "srecasm",
    version,
    about = "Convert binary input to Motorola S-Records or a dc.b assembly listing"
)]
pub struct Cli {
    /// Input file (default: read from stdin; `-` also means stdin).
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (`-` for stdout). Defaults to `<input>.srec` / `<input>.asm`
    /// when an input file is given, stdout otherwise.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format; `-srec` selects S-Records.
    #[arg(short = 's', long = "format", value_enum, default_value_t = FormatArg::Asm)]
    pub format: FormatArg,

    /// Label stored in the S0 header record.
    #[arg(long)]
    pub header: Option<String>,

    /// Directive that opens each assembly line.
    #[arg(long)]
    pub directive: Option<String>,

    /// Truncate input beyond this many bytes.
    #[arg(long = "max-bytes")]
    pub max_bytes: Option<usize>,

    /// Write a JSON manifest describing the run.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Install a stderr log subscriber; `RUST_LOG` takes precedence over `-v`.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the requested conversion.
pub fn run(cli: Cli) -> Result<()> {
    encode::handle(cli)
}

//! # cfgdiff CLI entry point
//!
//! Parses command-line arguments, installs logging, and runs the comparison.

use std::process::ExitCode;

use clap::Parser;

use cfgdiff_cli::compare::{run_compare, CompareArgs};
use cfgdiff_cli::logging::{init_tracing, LogFormat};

/// Compares two configuration files and highlights the differences.
///
/// Both files are parsed, normalized to sorted-key canonical JSON, and
/// compared line by line. Key order never counts as a difference.
#[derive(Parser, Debug)]
#[command(name = "cfgdiff", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    compare: CompareArgs,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet, cli.log_format);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "cfgdiff starting");

    match run_compare(&cli.compare) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

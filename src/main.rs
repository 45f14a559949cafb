//! deadkeys - dead key bitmask generator for QMK keyboard matrices
//!
//! Reads a keyboard's info.json on stdin and prints, for each matrix row, a
//! bitmask of the columns that have no key in the selected layout.
//!
//! # Usage
//!
//! ```bash
//! # Comma-separated masks for the first layout in sorted order
//! qmk info -kb beamic/ibm_f_xt -f json | deadkeys
//!
//! # Ready-to-paste block for beam_config.h
//! deadkeys --format define < info.json
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deadkeys::cli::{DeadKeysArgs, ExitCode};

/// deadkeys - compute per-row dead key bitmasks from a QMK info.json on stdin
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: DeadKeysArgs,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the masks
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.args.execute() {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code().into()
        }
    }
}

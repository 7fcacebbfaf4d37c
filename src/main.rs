//! opacity-fix - Rewrite deprecated Flutter withOpacity() calls
//!
//! Main entry point for the command line tool.
//!
//! # Execution Flow
//!
//! 1. Parse arguments
//! 2. Initialize logging (stderr, plus a rotating file with `--log-dir`)
//! 3. Load the optional settings and exclusion files, merge flags over them
//! 4. Discover candidate files under the root and rewrite them
//! 5. Print the summary to stdout
//!
//! # Exit status
//!
//! `0` when the run completes, even if some files failed. `1` when setup fails or
//! when every attempted rewrite failed.

use anyhow::Result;
use clap::Parser;
use opacity_fix::cli::Cli;
use opacity_fix::{APP_NAME, VERSION, run_migration};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Held until exit so the file appender flushes
    let _guard = opacity_fix::logging::setup_logging(cli.log_dir.as_deref(), APP_NAME, cli.verbose)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let options = cli.load_options()?;
    let summary = run_migration(&options, std::io::stdout().lock())?;

    if summary.all_attempts_failed() {
        tracing::error!(
            "All {} attempted rewrites failed",
            summary.files_attempted()
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

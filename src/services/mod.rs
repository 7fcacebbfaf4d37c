//! Services module - the discovery, rewrite and migration passes.
//!
//! The services have no dependency on the command line layer; every input is an explicit
//! parameter, so the same passes back the binary and the integration tests.
//!
//! # Components
//!
//! - [`discover_files`]: Walks a directory tree and returns files with the target extension
//!   whose content contains the trigger substring (`withOpacity(`).
//!
//! - [`RewriteService`]: Rewrites `.withOpacity(<ARG>)` to `.withValues(alpha: <ARG>)`.
//!   - [`MatchMode::Literal`](crate::models::MatchMode): `<ARG>` ends at the first `)`
//!   - [`MatchMode::Balanced`](crate::models::MatchMode): `<ARG>` ends at the closing `)`
//!
//! - [`run_migration`]: Discovery, exclusion filtering, rewriting and the console report.
//!
//! # Failure model
//!
//! Nothing in a run is fatal. Unreadable files and directories are logged and skipped;
//! a file that fails to rewrite counts as zero replacements and is recorded as failed.
//! Writes go straight to the target file, so a crash mid-write can leave it truncated.

pub mod discovery;
pub mod migration;
pub mod rewrite;

pub use discovery::discover_files;
pub use migration::{MigrationOptions, process_files, run_migration};
pub use rewrite::RewriteService;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors for a single file or directory entry during a run
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Error reading {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walkdir error already names the offending path
    #[error("Error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("Root is not a directory: {0}")]
    InvalidRoot(Utf8PathBuf),

    #[error("Invalid rewrite rule: {0}")]
    InvalidRule(String),
}

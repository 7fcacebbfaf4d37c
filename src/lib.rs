// opacity-fix - Rewrite deprecated Flutter withOpacity() calls
//
// This is the library crate containing the discovery, rewrite and reporting logic.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ExclusionList, FixSettings, MatchMode, RewriteRule};
pub use report::{FileStatus, RunSummary};
pub use services::{MigrationOptions, RewriteService, run_migration};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

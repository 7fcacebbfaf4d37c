//! Command line interface.
//!
//! Flags override the settings file, which overrides the built-in defaults.
//! Exclusions from every source are merged: the settings file first, then the
//! exclusion file, then `--exclude` flags.

use crate::config::ConfigManager;
use crate::models::{ExclusionConfig, FixSettings, MatchMode};
use crate::services::MigrationOptions;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "opacity-fix")]
#[command(version, about = "Rewrite deprecated withOpacity() calls to withValues(alpha: ...)")]
pub struct Cli {
    /// Directory to scan recursively
    pub root: Utf8PathBuf,

    /// Exact path to skip (repeatable)
    #[arg(long = "exclude", value_name = "PATH")]
    pub exclude: Vec<String>,

    /// YAML file with an `exclude:` list of paths to skip
    #[arg(long, value_name = "FILE")]
    pub exclude_file: Option<Utf8PathBuf>,

    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// File name suffix of candidate files [default: .dart]
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Match arguments up to the balancing `)` instead of the first one
    #[arg(long)]
    pub balanced: bool,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Also write a daily-rotated log file to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config_manager(&self) -> ConfigManager {
        ConfigManager::new(self.config.clone(), self.exclude_file.clone())
    }

    /// Load the configured files and resolve the options for this run
    pub fn load_options(&self) -> Result<MigrationOptions> {
        let manager = self.config_manager();
        let settings = manager.load_settings()?;
        let exclusions = manager.load_exclusions()?;
        Ok(self.resolve(settings, exclusions))
    }

    /// Merge flags over already loaded settings
    pub fn resolve(&self, settings: FixSettings, exclusion_file: ExclusionConfig) -> MigrationOptions {
        let mut options = MigrationOptions::from_settings(self.root.clone(), settings);
        if let Some(extension) = &self.extension {
            options.extension = extension.clone();
        }
        if self.balanced {
            options.match_mode = MatchMode::Balanced;
        }
        options.dry_run = self.dry_run;

        options.exclusions.extend(exclusion_file.exclude);
        options.exclusions.extend(self.exclude.iter().cloned());

        options
    }
}

use crate::models::{ExclusionConfig, FixSettings};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;

/// Configuration manager for loading YAML configuration files.
///
/// Manages two optional files:
/// - Settings file (`--config`): extension, match mode, rewrite rule, exclusions
/// - Exclusion file (`--exclude-file`): additional paths to skip
///
/// Unlike a per-user config directory, both files are named explicitly on the
/// command line, so a path that was given but does not exist is an error.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    settings_path: Option<Utf8PathBuf>,
    exclusion_path: Option<Utf8PathBuf>,
}

impl ConfigManager {
    /// Create a new ConfigManager.
    ///
    /// # Arguments
    /// * `settings_path` - Optional settings file
    /// * `exclusion_path` - Optional exclusion file
    pub fn new(settings_path: Option<Utf8PathBuf>, exclusion_path: Option<Utf8PathBuf>) -> Self {
        Self {
            settings_path,
            exclusion_path,
        }
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded FixSettings, or defaults if no settings file was given
    pub fn load_settings(&self) -> Result<FixSettings> {
        let Some(path) = &self.settings_path else {
            tracing::debug!("No settings file given, using defaults");
            return Ok(FixSettings::default());
        };

        let file_contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path))?;

        let settings: FixSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings file: {}", path))?;

        tracing::info!("Loaded settings from {}", path);
        Ok(settings)
    }

    /// Load the exclusion file.
    ///
    /// # Returns
    /// The loaded ExclusionConfig, or an empty one if no exclusion file was given
    pub fn load_exclusions(&self) -> Result<ExclusionConfig> {
        let Some(path) = &self.exclusion_path else {
            return Ok(ExclusionConfig::default());
        };

        let file_contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read exclusion file: {}", path))?;

        let config: ExclusionConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse exclusion file: {}", path))?;

        tracing::info!(
            "Loaded {} excluded paths from {}",
            config.exclude.len(),
            path
        );
        Ok(config)
    }
}

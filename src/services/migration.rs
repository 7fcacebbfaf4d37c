use super::{RewriteService, discover_files};
use crate::models::{DEFAULT_EXTENSION, ExclusionList, FixSettings, MatchMode, RewriteRule};
use crate::report::{Reporter, RunSummary};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// Fully resolved inputs for one run
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    pub root: Utf8PathBuf,
    pub extension: String,
    pub rule: RewriteRule,
    pub match_mode: MatchMode,
    pub exclusions: ExclusionList,
    pub dry_run: bool,
}

impl MigrationOptions {
    /// Options with built-in defaults for scanning `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            rule: RewriteRule::default(),
            match_mode: MatchMode::default(),
            exclusions: ExclusionList::new(),
            dry_run: false,
        }
    }

    /// Options taken from a settings file
    pub fn from_settings(root: impl Into<Utf8PathBuf>, settings: FixSettings) -> Self {
        Self {
            root: root.into(),
            extension: settings.extension,
            rule: settings.rule,
            match_mode: settings.match_mode,
            exclusions: settings.exclude.into_iter().collect(),
            dry_run: false,
        }
    }
}

/// Run discovery and the fix pass, printing progress to `out`
///
/// Individual file failures are logged and recorded in the returned summary;
/// only an invalid rewrite rule or a failed console write is an error.
pub fn run_migration<W: Write>(options: &MigrationOptions, out: W) -> Result<RunSummary> {
    let service = RewriteService::new(options.rule.clone(), options.match_mode)
        .context("Failed to build rewrite pattern")?
        .with_dry_run(options.dry_run);

    let mut reporter = Reporter::new(out, options.dry_run);
    reporter
        .discovery_started(&options.extension, &options.rule.deprecated)
        .context("Failed to write report")?;

    tracing::info!(
        "Scanning {} for {} files containing {} ({:?} mode{})",
        options.root,
        options.extension,
        options.rule.trigger(),
        options.match_mode,
        if options.dry_run { ", dry run" } else { "" }
    );

    let discovered = discover_files(&options.root, &options.extension, &options.rule.trigger());

    process_files(&discovered, &options.exclusions, &service, &mut reporter)
}

/// Filter `discovered` through `exclusions` and rewrite the rest
pub fn process_files<W: Write>(
    discovered: &[Utf8PathBuf],
    exclusions: &ExclusionList,
    service: &RewriteService,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary> {
    let (excluded, queued): (Vec<&Utf8Path>, Vec<&Utf8Path>) = discovered
        .iter()
        .map(Utf8PathBuf::as_path)
        .partition(|path| exclusions.contains(path.as_str()));

    for path in &excluded {
        tracing::info!("Skipping excluded file: {}", path);
    }

    let mut summary = RunSummary::new();
    summary.files_queued = queued.len();
    summary.files_excluded = excluded.len();

    reporter
        .files_queued(queued.len())
        .context("Failed to write report")?;

    for path in queued {
        match service.rewrite_file(path) {
            Ok(count) => {
                if count > 0 {
                    reporter
                        .file_fixed(path, count)
                        .context("Failed to write report")?;
                }
                summary.record_rewrite(path, count);
            }
            Err(e) => {
                tracing::error!("{}", e);
                summary.record_failure(path, &e);
            }
        }
    }

    reporter.summary(&summary).context("Failed to write report")?;
    summary.log_summary();

    Ok(summary)
}

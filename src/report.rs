// Run summary and console reporting
//
// Tracks per-file outcomes for one run and prints the progress lines and the
// final summary.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, Write};

/// Outcome of processing one queued file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// At least one call was replaced
    Fixed(usize),

    /// Read fine but nothing matched
    Unchanged,

    /// Read or write failed; counted as zero replacements
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub status: FileStatus,
}

/// Totals for one run
///
/// Counters are plain integers: a run is a single sequential pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files discovered and not excluded
    pub files_queued: usize,

    /// Discovered files dropped by the exclusion list
    pub files_excluded: usize,

    /// Files with at least one replacement
    pub files_fixed: usize,

    /// Files whose rewrite failed
    pub files_failed: usize,

    /// Sum of replacements over all fixed files
    pub total_replacements: usize,

    /// Per-file outcomes in processing order
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful rewrite of `count` calls (zero means unchanged)
    pub fn record_rewrite(&mut self, path: &Utf8Path, count: usize) {
        let status = if count > 0 {
            self.files_fixed += 1;
            self.total_replacements += count;
            FileStatus::Fixed(count)
        } else {
            FileStatus::Unchanged
        };

        self.outcomes.push(FileOutcome {
            path: path.to_path_buf(),
            status,
        });
    }

    /// Record a failed rewrite
    pub fn record_failure(&mut self, path: &Utf8Path, error: impl ToString) {
        self.files_failed += 1;
        self.outcomes.push(FileOutcome {
            path: path.to_path_buf(),
            status: FileStatus::Failed(error.to_string()),
        });
    }

    /// Number of files a rewrite was attempted on
    pub fn files_attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// True when rewrites were attempted and every one of them failed
    pub fn all_attempts_failed(&self) -> bool {
        self.files_attempted() > 0 && self.files_failed == self.files_attempted()
    }

    /// Paths of the files that were fixed, in processing order
    pub fn fixed_paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Fixed(_)))
            .map(|o| o.path.as_path())
    }

    /// Log the summary through tracing
    pub fn log_summary(&self) {
        tracing::info!(
            "Run complete: {} queued, {} excluded, {} fixed, {} failed, {} replacements",
            self.files_queued,
            self.files_excluded,
            self.files_fixed,
            self.files_failed,
            self.total_replacements
        );
    }
}

/// Writes the human-readable progress lines for a run
pub struct Reporter<W: Write> {
    out: W,
    dry_run: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, dry_run: bool) -> Self {
        Self { out, dry_run }
    }

    pub fn discovery_started(&mut self, extension: &str, method: &str) -> io::Result<()> {
        writeln!(self.out, "Finding {} files with {}()...", extension, method)
    }

    pub fn files_queued(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "Found {} files to fix", count)
    }

    pub fn file_fixed(&mut self, path: &Utf8Path, count: usize) -> io::Result<()> {
        if self.dry_run {
            writeln!(self.out, "Would fix {} occurrences in {}", count, path)
        } else {
            writeln!(self.out, "Fixed {} occurrences in {}", count, path)
        }
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Summary:")?;
        writeln!(self.out, "- Fixed {} files", summary.files_fixed)?;
        writeln!(self.out, "- Total replacements: {}", summary.total_replacements)?;
        if summary.files_failed > 0 {
            writeln!(self.out, "- Failed: {} files", summary.files_failed)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

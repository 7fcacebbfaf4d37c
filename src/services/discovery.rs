//! Candidate discovery for the rewrite pass.
//!
//! A file is a candidate when its name ends with the target extension and its
//! content contains the trigger substring. Discovery never fails: unreadable
//! files, unlistable directories and non-UTF-8 paths are logged and skipped.
//!
//! ```ignore
//! use opacity_fix::services::discover_files;
//! use camino::Utf8Path;
//!
//! let files = discover_files(Utf8Path::new("lib"), ".dart", "withOpacity(");
//! ```

use super::MigrationError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use walkdir::WalkDir;

/// Walks `root` recursively and returns every candidate file.
///
/// Symbolic links are not followed. The result is in traversal order.
///
/// # Arguments
///
/// * `root` - Directory to scan
/// * `extension` - File name suffix, e.g. `.dart`
/// * `trigger` - Substring the content must contain, e.g. `withOpacity(`
pub fn discover_files(root: &Utf8Path, extension: &str, trigger: &str) -> Vec<Utf8PathBuf> {
    if !root.is_dir() {
        tracing::error!("{}", MigrationError::InvalidRoot(root.to_path_buf()));
        return Vec::new();
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                // walkdir does not descend into a directory it failed to read
                tracing::warn!("{}", MigrationError::from(source));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(
                "{}",
                MigrationError::NonUtf8Path(entry.path().to_string_lossy().into_owned())
            );
            continue;
        };

        if !has_extension(path, extension) {
            continue;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                if content.contains(trigger) {
                    tracing::debug!("Candidate: {}", path);
                    files.push(path.to_path_buf());
                }
            }
            Err(source) => {
                tracing::warn!(
                    "{}",
                    MigrationError::Read {
                        path: path.to_path_buf(),
                        source,
                    }
                );
            }
        }
    }

    tracing::info!("Discovered {} candidate files under {}", files.len(), root);
    files
}

fn has_extension(path: &Utf8Path, extension: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.ends_with(extension))
}

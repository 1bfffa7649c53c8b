//! Managed profile discovery
//!
//! This module walks a category folder recursively and yields the relative
//! paths of the files that pass a [`ScanFilter`]:
//! - the base name carries a managed-profile marker
//! - the extension is allowed (optional)
//! - the base name contains the name filter (optional)
//! - no configured ignore pattern excludes it
//!
//! A missing root is normal (first run, fresh install) and scans as empty.

mod filters;
mod markers;

#[cfg(test)]
mod integration_tests;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

pub use filters::ScanFilter;
pub use markers::{MarkerSet, is_managed};

use crate::error::Issue;

/// Result of a scan with per-entry failures
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Included files relative to the scan root, sorted
    pub files: Vec<PathBuf>,
    /// Entries that could not be read
    pub issues: Vec<Issue>,
}

/// Recursive profile scanner
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    filter: ScanFilter,
}

impl Scanner {
    /// Create a new scanner with the given filter
    #[must_use]
    pub const fn new(filter: ScanFilter) -> Self {
        Self { filter }
    }

    /// Filter applied by this scanner
    #[must_use]
    pub const fn filter(&self) -> &ScanFilter {
        &self.filter
    }

    /// Scan a root directory for matching files
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanResult {
        let mut result = ScanResult::default();

        if !root.exists() {
            debug!(root = %root.display(), "scan root missing, treating as empty");
            return result;
        }

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    result.issues.push(Issue::unreadable(&path, e));
                    continue;
                }
            };

            // Symlinked files count when their target is a regular file
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            if self.filter.should_include(relative) {
                result.files.push(relative.to_path_buf());
            }
        }

        result.files.sort();
        debug!(
            root = %root.display(),
            files = result.files.len(),
            "scan complete"
        );
        result
    }
}

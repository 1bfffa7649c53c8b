//! Tree comparison and divergence classification
//!
//! This module provides read-only analysis of two profile trees:
//! - Managed-file discovery on both sides via the [`Scanner`]
//! - Per-path classification with an interchangeable [`PairComparer`]
//! - SHA-256 content checks and mtime ordering
//! - Unified diffs for diverged files

mod diff;
mod hash;
mod strategy;
mod timestamp;


use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use diff::DiffGenerator;
pub use hash::{FileHash, FileHasher};
pub use strategy::{CompareMode, ContentComparer, PairComparer, TimestampComparer};
pub use timestamp::TimestampComparator;

use crate::error::Issue;
use crate::scanner::Scanner;

/// Classification of one relative path across roots A and B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Present only under A
    OnlyA,
    /// Present only under B
    OnlyB,
    /// Present in both and considered equal by the comparer
    Same,
    /// A's copy is newer
    ANewer,
    /// B's copy is newer
    BNewer,
    /// Bytes differ but mtimes are equal (content mode only)
    Differs,
}

impl EntryStatus {
    /// Stable snake_case label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnlyA => "only_a",
            Self::OnlyB => "only_b",
            Self::Same => "same",
            Self::ANewer => "a_newer",
            Self::BNewer => "b_newer",
            Self::Differs => "differs",
        }
    }

    /// Same status seen with A and B swapped
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::OnlyA => Self::OnlyB,
            Self::OnlyB => Self::OnlyA,
            Self::ANewer => Self::BNewer,
            Self::BNewer => Self::ANewer,
            Self::Same => Self::Same,
            Self::Differs => Self::Differs,
        }
    }

    /// Whether the file exists on both sides with a divergence signal
    #[must_use]
    pub const fn is_diverged(self) -> bool {
        matches!(self, Self::ANewer | Self::BNewer | Self::Differs)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Path relative to both roots
    pub relative_path: PathBuf,
    /// Present under A
    pub in_a: bool,
    /// Present under B
    pub in_b: bool,
    /// Classification
    pub status: EntryStatus,
}

/// Result of comparing two roots
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    /// Entries sorted by relative path
    pub entries: Vec<ComparisonEntry>,
    /// Paths that could not be scanned or compared
    pub issues: Vec<Issue>,
}

impl Comparison {
    /// Whether every entry is `same`
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.entries.iter().all(|e| e.status == EntryStatus::Same)
    }

    /// Number of entries with the given status
    #[must_use]
    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Entries that are not `same`
    pub fn changes(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter().filter(|e| e.status != EntryStatus::Same)
    }
}

/// Compares two profile roots
#[derive(Debug, Clone, Default)]
pub struct TreeComparator {
    scanner: Scanner,
    mode: CompareMode,
}

impl TreeComparator {
    /// Create a comparator scanning both roots with `scanner`
    #[must_use]
    pub const fn new(scanner: Scanner, mode: CompareMode) -> Self {
        Self { scanner, mode }
    }

    /// Comparison mode in use
    #[must_use]
    pub const fn mode(&self) -> CompareMode {
        self.mode
    }

    /// Classify every managed relative path in the union of both roots
    ///
    /// Unreadable pairs are reported as issues and left out of the entries.
    #[must_use]
    pub fn compare(&self, root_a: &Path, root_b: &Path) -> Comparison {
        self.compare_with(root_a, root_b, self.mode.comparer())
    }

    /// [`compare`](Self::compare) with an explicit pair classifier
    #[must_use]
    pub fn compare_with(
        &self,
        root_a: &Path,
        root_b: &Path,
        comparer: &dyn PairComparer,
    ) -> Comparison {
        let scan_a = self.scanner.scan(root_a);
        let scan_b = self.scanner.scan(root_b);

        let files_a: BTreeSet<&PathBuf> = scan_a.files.iter().collect();
        let files_b: BTreeSet<&PathBuf> = scan_b.files.iter().collect();

        let mut comparison = Comparison::default();
        comparison.issues.extend(scan_a.issues.iter().cloned());
        comparison.issues.extend(scan_b.issues.iter().cloned());

        for relative in files_a.union(&files_b) {
            let in_a = files_a.contains(relative);
            let in_b = files_b.contains(relative);

            let status = match (in_a, in_b) {
                (true, false) => EntryStatus::OnlyA,
                (false, true) => EntryStatus::OnlyB,
                _ => {
                    let a = root_a.join(relative);
                    match comparer.classify(&a, &root_b.join(relative)) {
                        Ok(status) => status,
                        Err(e) => {
                            warn!(path = %relative.display(), error = %e, "cannot compare");
                            comparison.issues.push(Issue::unreadable(&a, format!("{e:#}")));
                            continue;
                        }
                    }
                }
            };

            comparison.entries.push(ComparisonEntry {
                relative_path: (*relative).clone(),
                in_a,
                in_b,
                status,
            });
        }

        debug!(
            a = %root_a.display(),
            b = %root_b.display(),
            entries = comparison.entries.len(),
            mode = ?self.mode,
            "comparison complete"
        );
        comparison
    }
}

//! Interchangeable strategies for classifying a file present in both trees

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::EntryStatus;
use super::hash::FileHasher;
use super::timestamp::TimestampComparator;
use crate::error::Result;

/// Classifies a pair of files that exist under both roots
pub trait PairComparer {
    /// Status of `a` relative to `b`
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read.
    fn classify(&self, a: &Path, b: &Path) -> Result<EntryStatus>;
}

/// Modification time only; equal mtimes count as `same`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampComparer;

impl PairComparer for TimestampComparer {
    fn classify(&self, a: &Path, b: &Path) -> Result<EntryStatus> {
        Ok(match TimestampComparator::compare_times(a, b)? {
            Ordering::Greater => EntryStatus::ANewer,
            Ordering::Less => EntryStatus::BNewer,
            Ordering::Equal => EntryStatus::Same,
        })
    }
}

/// SHA-256 content first, mtime for direction
///
/// Differing bytes with equal mtimes classify as [`EntryStatus::Differs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentComparer;

impl PairComparer for ContentComparer {
    fn classify(&self, a: &Path, b: &Path) -> Result<EntryStatus> {
        if FileHasher::same_content(a, b)? {
            return Ok(EntryStatus::Same);
        }

        Ok(match TimestampComparator::compare_times(a, b)? {
            Ordering::Greater => EntryStatus::ANewer,
            Ordering::Less => EntryStatus::BNewer,
            Ordering::Equal => EntryStatus::Differs,
        })
    }
}

/// Comparison strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Fast mtime heuristic used by fetch and push
    #[default]
    Timestamp,
    /// Exact byte comparison used by diff reports
    Content,
}

impl CompareMode {
    /// Comparer implementing this mode
    #[must_use]
    pub fn comparer(self) -> &'static dyn PairComparer {
        match self {
            Self::Timestamp => &TimestampComparer,
            Self::Content => &ContentComparer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{FileTime, set_file_mtime};
    use std::fs;
    use tempfile::TempDir;

    fn pair(tmp: &TempDir, a: &str, b: &str, a_secs: i64, b_secs: i64) -> (std::path::PathBuf, std::path::PathBuf) {
        let pa = tmp.path().join("a.json");
        let pb = tmp.path().join("b.json");
        fs::write(&pa, a).unwrap();
        fs::write(&pb, b).unwrap();
        set_file_mtime(&pa, FileTime::from_unix_time(a_secs, 0)).unwrap();
        set_file_mtime(&pb, FileTime::from_unix_time(b_secs, 0)).unwrap();
        (pa, pb)
    }

    #[test]
    fn test_timestamp_equal_mtime_is_same_even_if_bytes_differ() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = pair(&tmp, "{\"a\":1}", "{\"a\":2}", 100, 100);

        assert_eq!(TimestampComparer.classify(&a, &b).unwrap(), EntryStatus::Same);
    }

    #[test]
    fn test_timestamp_direction() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = pair(&tmp, "{}", "{}", 110, 100);

        assert_eq!(TimestampComparer.classify(&a, &b).unwrap(), EntryStatus::ANewer);
        assert_eq!(TimestampComparer.classify(&b, &a).unwrap(), EntryStatus::BNewer);
    }

    #[test]
    fn test_content_identical_bytes_are_same_despite_mtime() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = pair(&tmp, "{}", "{}", 110, 100);

        assert_eq!(ContentComparer.classify(&a, &b).unwrap(), EntryStatus::Same);
    }

    #[test]
    fn test_content_equal_mtime_different_bytes_differs() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = pair(&tmp, "{\"a\":1}", "{\"a\":2}", 100, 100);

        assert_eq!(ContentComparer.classify(&a, &b).unwrap(), EntryStatus::Differs);
        assert_eq!(
            CompareMode::Timestamp.comparer().classify(&a, &b).unwrap(),
            EntryStatus::Same
        );
    }

    #[test]
    fn test_content_direction_uses_mtime() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = pair(&tmp, "{\"a\":1}", "{\"a\":2}", 100, 110);

        assert_eq!(
            CompareMode::Content.comparer().classify(&a, &b).unwrap(),
            EntryStatus::BNewer
        );
    }
}

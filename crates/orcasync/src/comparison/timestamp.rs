//! File timestamp comparison for determining recency

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Get the modification time of a file
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn get_modified_time(path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))
    }

    /// Compare modification times of `a` and `b`
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn compare_times(a: &Path, b: &Path) -> Result<Ordering> {
        let a_time = Self::get_modified_time(a)?;
        let b_time = Self::get_modified_time(b)?;

        Ok(a_time.cmp(&b_time))
    }
}

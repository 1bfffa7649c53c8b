//! Unified diff generation for diverged profiles

use std::fs;
use std::path::Path;

use anyhow::Context;
use similar::TextDiff;

use crate::error::Result;

const DIFF_CONTEXT_LINES: usize = 3;

/// Diff generator for textual profile diffs
pub struct DiffGenerator;

impl DiffGenerator {
    /// Unified diff turning `old` into `new`, headed by the given labels
    ///
    /// Returns an empty string for identical files.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read.
    pub fn unified(old: &Path, new: &Path, old_label: &str, new_label: &str) -> Result<String> {
        let old_content = fs::read_to_string(old)
            .with_context(|| format!("Failed to read file: {}", old.display()))?;
        let new_content = fs::read_to_string(new)
            .with_context(|| format!("Failed to read file: {}", new.display()))?;

        Ok(Self::unified_from_content(
            &old_content,
            &new_content,
            old_label,
            new_label,
        ))
    }

    /// Unified diff between two strings
    #[must_use]
    pub fn unified_from_content(
        old_content: &str,
        new_content: &str,
        old_label: &str,
        new_label: &str,
    ) -> String {
        if old_content == new_content {
            return String::new();
        }

        let diff = TextDiff::from_lines(old_content, new_content);
        diff.unified_diff()
            .context_radius(DIFF_CONTEXT_LINES)
            .header(old_label, new_label)
            .to_string()
    }
}

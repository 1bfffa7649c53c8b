//! Gitignore-style pattern matching using the ignore crate

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

/// Pattern matcher for relative profile paths
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    gitignore: Gitignore,
}

impl PatternMatcher {
    /// Build pattern matcher from ignore and include patterns
    ///
    /// Returns `None` when both lists are empty.
    ///
    /// # Errors
    ///
    /// Returns an error if patterns are invalid.
    pub fn from_lists(ignore: &[String], include: &[String]) -> Result<Option<Self>> {
        if ignore.is_empty() && include.is_empty() {
            return Ok(None);
        }
        Self::with_patterns(ignore, include).map(Some)
    }

    /// Build pattern matcher from ignore and include patterns
    ///
    /// # Errors
    ///
    /// Returns an error if patterns are invalid.
    pub fn with_patterns(ignore_patterns: &[String], include_patterns: &[String]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new("");

        for pattern in ignore_patterns {
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid ignore pattern: '{pattern}'"))?;
        }

        // Include patterns are negated ignores
        for pattern in include_patterns {
            builder
                .add_line(None, &format!("!{pattern}"))
                .with_context(|| format!("Invalid include pattern: '{pattern}'"))?;
        }

        let gitignore = builder.build().context("Failed to compile patterns")?;

        Ok(Self { gitignore })
    }

    /// Check if a relative path should be included
    ///
    /// Parent directories are considered, so `archive/` excludes every file
    /// below an `archive` folder.
    #[must_use]
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        !self
            .gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

//! File filtering for profile scans

use std::path::Path;

use super::markers::MarkerSet;
use crate::config::PatternMatcher;

/// Filter applied to every regular file found under a scan root
///
/// A file is included when its base name is managed, its extension is in the
/// allow-list (if one is set), its base name contains the name filter
/// case-insensitively (if one is set) and no ignore pattern excludes its
/// relative path.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    markers: MarkerSet,
    extensions: Option<Vec<String>>,
    name_filter: Option<String>,
    patterns: Option<PatternMatcher>,
}

impl ScanFilter {
    /// Create a filter that only checks markers
    #[must_use]
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    /// Filter that includes every regular file
    #[must_use]
    pub fn everything() -> Self {
        Self::new(MarkerSet::wildcard())
    }

    /// Restrict to the given extensions (leading dots optional)
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .collect();
        self.extensions = if extensions.is_empty() {
            None
        } else {
            Some(extensions)
        };
        self
    }

    /// Only include base names containing `filter` (case-insensitive)
    #[must_use]
    pub fn with_name_filter(mut self, filter: Option<&str>) -> Self {
        self.name_filter = filter
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// Exclude relative paths matched by gitignore-style patterns
    #[must_use]
    pub fn with_patterns(mut self, patterns: Option<PatternMatcher>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Markers used by this filter
    #[must_use]
    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Check if a file (relative to its scan root) should be included
    #[must_use]
    pub fn should_include(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.markers.is_managed(name) {
            return false;
        }

        if let Some(extensions) = &self.extensions {
            let matches = relative
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)));
            if !matches {
                return false;
            }
        }

        if let Some(filter) = &self.name_filter {
            if !name.to_lowercase().contains(filter.as_str()) {
                return false;
            }
        }

        self.patterns
            .as_ref()
            .is_none_or(|p| p.should_include(relative, false))
    }
}

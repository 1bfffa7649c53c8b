//! Managed-profile markers
//!
//! A file is "managed" when its base name contains one of the configured
//! marker substrings. An empty marker list, or a list holding the empty-string
//! sentinel, matches every name.

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of name markers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MarkerSet {
    markers: Vec<String>,
    wildcard: bool,
}

impl MarkerSet {
    /// Build a marker set, keeping first-seen order
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        let mut any = false;
        for marker in markers {
            any = true;
            let marker = marker.into();
            if marker.is_empty() {
                set.wildcard = true;
            } else if !set.markers.contains(&marker) {
                set.markers.push(marker);
            }
        }
        if !any {
            set.wildcard = true;
        }
        set
    }

    /// Marker set that matches every name
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            markers: Vec::new(),
            wildcard: true,
        }
    }

    /// Whether every name is managed
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard || self.markers.is_empty()
    }

    /// Configured markers (the empty-string sentinel is not listed)
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether a base name is a managed profile
    #[must_use]
    pub fn is_managed(&self, name: &str) -> bool {
        is_managed(name, self)
    }
}

impl From<Vec<String>> for MarkerSet {
    fn from(markers: Vec<String>) -> Self {
        Self::new(markers)
    }
}

impl From<MarkerSet> for Vec<String> {
    fn from(set: MarkerSet) -> Self {
        let mut markers = set.markers;
        if set.wildcard {
            markers.push(String::new());
        }
        markers
    }
}

/// Whether `name` contains at least one marker, or the set is a wildcard
#[must_use]
pub fn is_managed(name: &str, markers: &MarkerSet) -> bool {
    markers.is_wildcard() || markers.markers.iter().any(|m| name.contains(m.as_str()))
}

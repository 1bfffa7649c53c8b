//! Name to file index used to resolve `inherits` references

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::document::ProfileDocument;
use crate::error::Issue;

/// Mapping from profile `name` to the file declaring it
///
/// Documents are indexed in the order given; when two share a name the later
/// one wins and a [`Issue::DuplicateProfileName`] is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InheritanceIndex {
    by_name: BTreeMap<String, PathBuf>,
}

impl InheritanceIndex {
    /// Index `documents`, reporting unnamed and shadowed documents
    #[must_use]
    pub fn build(documents: &[ProfileDocument]) -> (Self, Vec<Issue>) {
        let mut index = Self::default();
        let mut issues = Vec::new();

        for doc in documents {
            let Some(name) = doc.name() else {
                issues.push(Issue::MissingName(doc.path.clone()));
                continue;
            };

            if let Some(shadowed) = index.by_name.insert(name.to_string(), doc.path.clone()) {
                warn!(
                    profile = name,
                    kept = %doc.path.display(),
                    shadowed = %shadowed.display(),
                    "duplicate profile name"
                );
                issues.push(Issue::DuplicateProfileName {
                    name: name.to_string(),
                    kept: doc.path.clone(),
                    shadowed,
                });
            }
        }

        (index, issues)
    }

    /// File declaring `name`
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.by_name.get(name).map(PathBuf::as_path)
    }

    /// Number of indexed names
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(path: &str, fields: serde_json::Value) -> ProfileDocument {
        ProfileDocument {
            path: PathBuf::from(path),
            relative_path: PathBuf::from(path),
            fields: fields.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_index_by_name() {
        let (index, issues) = InheritanceIndex::build(&[
            doc("a.json", json!({"name": "A"})),
            doc("b.json", json!({"name": "B"})),
        ]);

        assert!(issues.is_empty());
        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve("B"), Some(Path::new("b.json")));
        assert_eq!(index.resolve("C"), None);
    }

    #[test]
    fn test_unnamed_documents_are_reported_not_indexed() {
        let (index, issues) = InheritanceIndex::build(&[
            doc("anon.json", json!({"a": 1})),
            doc("empty.json", json!({"name": ""})),
        ]);

        assert!(index.is_empty());
        assert_eq!(
            issues,
            vec![
                Issue::MissingName(PathBuf::from("anon.json")),
                Issue::MissingName(PathBuf::from("empty.json")),
            ]
        );
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let (index, issues) = InheritanceIndex::build(&[
            doc("first.json", json!({"name": "Dup"})),
            doc("second.json", json!({"name": "Dup"})),
        ]);

        assert_eq!(index.resolve("Dup"), Some(Path::new("second.json")));
        assert_eq!(
            issues,
            vec![Issue::DuplicateProfileName {
                name: "Dup".to_string(),
                kept: PathBuf::from("second.json"),
                shadowed: PathBuf::from("first.json"),
            }]
        );
    }
}

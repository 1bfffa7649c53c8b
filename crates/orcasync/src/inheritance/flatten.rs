//! Single-hop and transitive flattening

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::document::{self, INHERITS_FIELD, ProfileDocument};
use super::index::InheritanceIndex;
use crate::error::{Issue, Result};
use crate::scanner::{ScanFilter, Scanner};

/// How far inheritance chains are followed in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenDepth {
    /// Resolve exactly one `inherits` hop
    #[default]
    SinglePass,
    /// Follow the chain to a standalone base, failing on cycles
    Transitive,
}

/// A document with its inheritance resolved
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenResult {
    /// File to overwrite
    pub path: PathBuf,
    /// Path relative to the flattened folder
    pub relative_path: PathBuf,
    /// Base name the document inherited from
    pub base_name: String,
    /// Fields the document gained from its base chain
    pub added_keys: BTreeSet<String>,
    /// Merged fields, without `inherits`
    pub document: Map<String, Value>,
}

impl FlattenResult {
    /// Merged document as pretty JSON (4-space indent)
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        document::to_pretty_json(&self.document)
    }
}

/// Outcome of flattening a set of documents
#[derive(Debug, Clone, Default)]
pub struct FlattenReport {
    /// Successfully flattened documents
    pub results: Vec<FlattenResult>,
    /// Load, index and resolution problems
    pub issues: Vec<Issue>,
}

/// Inheritance flattener
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener {
    depth: FlattenDepth,
}

impl Flattener {
    /// Create a flattener
    #[must_use]
    pub const fn new(depth: FlattenDepth) -> Self {
        Self { depth }
    }

    /// Flatten every `*.json` document under `root`
    ///
    /// All JSON files are indexed, so bases without a managed marker still
    /// resolve.
    #[must_use]
    pub fn flatten_dir(&self, root: &Path) -> FlattenReport {
        let scan = Scanner::new(ScanFilter::everything().with_extensions(["json"])).scan(root);
        let (documents, load_issues) = ProfileDocument::load_all(root, &scan.files);
        let (index, index_issues) = InheritanceIndex::build(&documents);

        let mut report = self.flatten(&documents, &index);
        let mut issues = scan.issues;
        issues.extend(load_issues);
        issues.extend(index_issues);
        issues.append(&mut report.issues);
        report.issues = issues;
        report
    }

    /// Flatten `documents` against `index`
    ///
    /// Standalone documents are skipped. A document that fails to resolve is
    /// reported and left out; the rest are still flattened.
    #[must_use]
    pub fn flatten(&self, documents: &[ProfileDocument], index: &InheritanceIndex) -> FlattenReport {
        let mut report = FlattenReport::default();

        for doc in documents {
            match self.flatten_one(doc, index) {
                Ok(Some(result)) => {
                    debug!(
                        path = %result.relative_path.display(),
                        base = %result.base_name,
                        added = result.added_keys.len(),
                        "flattened"
                    );
                    report.results.push(result);
                }
                Ok(None) => {}
                Err(issue) => {
                    warn!("{issue}");
                    report.issues.push(issue);
                }
            }
        }

        report
    }

    fn flatten_one(
        &self,
        doc: &ProfileDocument,
        index: &InheritanceIndex,
    ) -> std::result::Result<Option<FlattenResult>, Issue> {
        let Some(base_name) = doc.inherits() else {
            return Ok(None);
        };

        let mut merged = doc.fields.clone();
        let mut next_base = base_name.to_string();
        let mut visited = vec![doc.path.clone()];
        let mut chain = vec![doc.display_name()];

        loop {
            let base_path = index
                .resolve(&next_base)
                .filter(|path| path.exists())
                .ok_or_else(|| Issue::BaseNotFound {
                    path: doc.path.clone(),
                    base: next_base.clone(),
                })?;

            chain.push(next_base.clone());
            if self.depth == FlattenDepth::Transitive && visited.iter().any(|p| p == base_path) {
                return Err(Issue::InheritanceCycle {
                    path: doc.path.clone(),
                    chain,
                });
            }

            let (root, relative) = split(base_path);
            let base = ProfileDocument::load(root, relative).map_err(|e| Issue::BaseUnreadable {
                path: doc.path.clone(),
                base: next_base.clone(),
                reason: e.to_string(),
            })?;

            let mut layered = base.fields.clone();
            for (key, value) in merged {
                layered.insert(key, value);
            }
            merged = layered;
            visited.push(base_path.to_path_buf());

            match (self.depth, base.inherits()) {
                (FlattenDepth::Transitive, Some(parent)) => next_base = parent.to_string(),
                _ => break,
            }
        }

        merged.shift_remove(INHERITS_FIELD);
        let added_keys = merged
            .keys()
            .filter(|key| !doc.fields.contains_key(*key))
            .cloned()
            .collect();

        Ok(Some(FlattenResult {
            path: doc.path.clone(),
            relative_path: doc.relative_path.clone(),
            base_name: base_name.to_string(),
            added_keys,
            document: merged,
        }))
    }
}

fn split(path: &Path) -> (&Path, &Path) {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => (parent, Path::new(name)),
        _ => (Path::new(""), path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, value: serde_json::Value) -> ProfileDocument {
        fs::write(root.join(name), value.to_string()).unwrap();
        ProfileDocument::load(root, Path::new(name)).unwrap()
    }

    #[test]
    fn test_merge_example() {
        let tmp = TempDir::new().unwrap();
        let base = write(tmp.path(), "base.json", json!({"name": "B", "a": 1, "b": 2}));
        let child = write(tmp.path(), "child.json", json!({"name": "C", "inherits": "B", "b": 3}));
        let docs = vec![base, child];
        let (index, _) = InheritanceIndex::build(&docs);

        let report = Flattener::default().flatten(&docs, &index);

        assert!(report.issues.is_empty());
        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(
            Value::Object(result.document.clone()),
            json!({"name": "C", "a": 1, "b": 3})
        );
        assert_eq!(result.added_keys, BTreeSet::from(["a".to_string()]));
        assert_eq!(result.base_name, "B");
    }

    #[test]
    fn test_merged_key_order_follows_base() {
        let tmp = TempDir::new().unwrap();
        let base = write(tmp.path(), "base.json", json!({"name": "B", "x": 1, "y": 2}));
        let child = write(tmp.path(), "child.json", json!({"name": "C", "inherits": "B", "z": 3}));
        let docs = vec![base, child];
        let (index, _) = InheritanceIndex::build(&docs);

        let report = Flattener::default().flatten(&docs, &index);

        let keys: Vec<_> = report.results[0].document.keys().cloned().collect();
        assert_eq!(keys, ["name", "x", "y", "z"]);
    }

    #[test]
    fn test_single_pass_resolves_one_level() {
        let tmp = TempDir::new().unwrap();
        let docs = vec![
            write(tmp.path(), "a.json", json!({"name": "A", "root": true})),
            write(tmp.path(), "b.json", json!({"name": "B", "inherits": "A", "mid": true})),
            write(tmp.path(), "c.json", json!({"name": "C", "inherits": "B", "leaf": true})),
        ];
        let (index, _) = InheritanceIndex::build(&docs);

        let report = Flattener::new(FlattenDepth::SinglePass).flatten(&docs, &index);

        let c = report.results.iter().find(|r| r.base_name == "B").unwrap();
        assert!(c.document.contains_key("mid"));
        assert!(!c.document.contains_key("root"));
        assert!(!c.document.contains_key(INHERITS_FIELD));
    }

    #[test]
    fn test_transitive_resolves_full_chain() {
        let tmp = TempDir::new().unwrap();
        let docs = vec![
            write(tmp.path(), "a.json", json!({"name": "A", "root": true, "v": 1})),
            write(tmp.path(), "b.json", json!({"name": "B", "inherits": "A", "v": 2})),
            write(tmp.path(), "c.json", json!({"name": "C", "inherits": "B", "leaf": true})),
        ];
        let (index, _) = InheritanceIndex::build(&docs);

        let report = Flattener::new(FlattenDepth::Transitive).flatten(&docs, &index);

        let c = report.results.iter().find(|r| r.base_name == "B").unwrap();
        assert_eq!(
            Value::Object(c.document.clone()),
            json!({"name": "C", "root": true, "v": 2, "leaf": true})
        );
        assert_eq!(
            c.added_keys,
            BTreeSet::from(["root".to_string(), "v".to_string()])
        );
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split(Path::new("/tmp/x/base.json")),
            (Path::new("/tmp/x"), Path::new("base.json"))
        );
    }
}

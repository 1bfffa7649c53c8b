//! JSON profile documents

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Issue, Result};

/// Field holding a profile's identity
pub const NAME_FIELD: &str = "name";

/// Field referencing the base profile
pub const INHERITS_FIELD: &str = "inherits";

/// A profile JSON object and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDocument {
    /// File the document was read from
    pub path: PathBuf,
    /// Path relative to the scanned category folder
    pub relative_path: PathBuf,
    /// Top-level fields in file order
    pub fields: Map<String, Value>,
}

impl ProfileDocument {
    /// Load `root/relative`
    ///
    /// # Errors
    ///
    /// [`Issue::UnreadableFile`] if the file cannot be read,
    /// [`Issue::InvalidJson`] if it is not a JSON object.
    pub fn load(root: &Path, relative: &Path) -> std::result::Result<Self, Issue> {
        let path = root.join(relative);
        let content = fs::read_to_string(&path).map_err(|e| Issue::unreadable(&path, e))?;
        let fields = Self::parse(&path, &content)?;

        Ok(Self {
            path,
            relative_path: relative.to_path_buf(),
            fields,
        })
    }

    /// Parse document text into its top-level fields
    ///
    /// # Errors
    ///
    /// [`Issue::InvalidJson`] if the text is not a JSON object.
    pub fn parse(path: &Path, content: &str) -> std::result::Result<Map<String, Value>, Issue> {
        let invalid = |reason: String| Issue::InvalidJson {
            path: path.to_path_buf(),
            reason,
        };

        match serde_json::from_str::<Value>(content).map_err(|e| invalid(e.to_string()))? {
            Value::Object(fields) => Ok(fields),
            _ => Err(invalid("expected a JSON object".to_string())),
        }
    }

    /// Load many documents under `root`, collecting failures
    #[must_use]
    pub fn load_all(root: &Path, relatives: &[PathBuf]) -> (Vec<Self>, Vec<Issue>) {
        let mut documents = Vec::new();
        let mut issues = Vec::new();

        for relative in relatives {
            match Self::load(root, relative) {
                Ok(doc) => documents.push(doc),
                Err(issue) => issues.push(issue),
            }
        }

        (documents, issues)
    }

    /// Non-empty string `name`
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Non-blank string `inherits`, trimmed
    #[must_use]
    pub fn inherits(&self) -> Option<&str> {
        self.fields
            .get(INHERITS_FIELD)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }

    /// Name used in messages: `name`, else the relative path
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name().map_or_else(
            || self.relative_path.display().to_string(),
            str::to_string,
        )
    }
}

/// Serialize fields as pretty JSON with 4-space indentation, keeping key order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty_json(fields: &Map<String, Value>) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    fields
        .serialize(&mut serializer)
        .context("Failed to serialize profile")?;

    String::from_utf8(buffer).context("Serialized profile is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_object() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ODG_PLA.json"), r#"{"name":"PLA","inherits":" Base "}"#).unwrap();

        let doc = ProfileDocument::load(tmp.path(), Path::new("ODG_PLA.json")).unwrap();

        assert_eq!(doc.name(), Some("PLA"));
        assert_eq!(doc.inherits(), Some("Base"));
        assert_eq!(doc.relative_path, PathBuf::from("ODG_PLA.json"));
    }

    #[test]
    fn test_blank_inherits_is_none() {
        let fields = ProfileDocument::parse(Path::new("x.json"), r#"{"name":"X","inherits":"  "}"#).unwrap();
        let doc = ProfileDocument {
            path: PathBuf::from("x.json"),
            relative_path: PathBuf::from("x.json"),
            fields,
        };
        assert_eq!(doc.inherits(), None);
    }

    #[test]
    fn test_invalid_json_and_non_objects() {
        let path = Path::new("bad.json");
        assert!(matches!(
            ProfileDocument::parse(path, "{not json"),
            Err(Issue::InvalidJson { .. })
        ));
        assert!(matches!(
            ProfileDocument::parse(path, "[1, 2]"),
            Err(Issue::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            ProfileDocument::load(tmp.path(), Path::new("gone.json")),
            Err(Issue::UnreadableFile { .. })
        ));
    }

    #[test]
    fn test_pretty_json_keeps_order_and_indent() {
        let fields =
            ProfileDocument::parse(Path::new("x.json"), r#"{"name":"C","z":1,"a":[1]}"#).unwrap();

        let text = to_pretty_json(&fields).unwrap();

        assert_eq!(
            text,
            "{\n    \"name\": \"C\",\n    \"z\": 1,\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_load_all_collects_issues() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("good.json"), r#"{"name":"G"}"#).unwrap();
        fs::write(tmp.path().join("bad.json"), "nope").unwrap();

        let (docs, issues) = ProfileDocument::load_all(
            tmp.path(),
            &[PathBuf::from("bad.json"), PathBuf::from("good.json")],
        );

        assert_eq!(docs.len(), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path(), tmp.path().join("bad.json"));
    }
}

//! Structural checks for managed profiles
//!
//! Only presence and type of structural fields are checked; profile values
//! are opaque.

use tracing::debug;

use crate::error::Issue;
use crate::inheritance::ProfileDocument;
use crate::profile::{Category, ProfileRoot};
use crate::scanner::{MarkerSet, ScanFilter, Scanner};

const STRING_FIELDS: [&str; 2] = ["name", "inherits"];

/// Validation outcome for one category folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValidation {
    /// Category checked
    pub category: Category,
    /// Number of managed JSON files checked
    pub checked: usize,
    /// Problems and notices, in file order
    pub issues: Vec<Issue>,
}

impl CategoryValidation {
    /// Issues that are defects rather than notices
    pub fn defects(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_notice())
    }
}

/// Validator for managed profile folders
#[derive(Debug, Clone)]
pub struct ProfileValidator {
    scanner: Scanner,
}

impl ProfileValidator {
    /// Validator for JSON files whose names carry one of `markers`
    #[must_use]
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            scanner: Scanner::new(ScanFilter::new(markers).with_extensions(["json"])),
        }
    }

    /// Check every managed document in `root`
    #[must_use]
    pub fn validate(&self, root: &ProfileRoot, required_fields: &[String]) -> CategoryValidation {
        let scan = self.scanner.scan(&root.path);
        let mut issues = scan.issues;

        for relative in &scan.files {
            match ProfileDocument::load(&root.path, relative) {
                Ok(doc) => issues.extend(Self::check(&doc, required_fields)),
                Err(issue) => issues.push(issue),
            }
        }

        debug!(
            category = %root.category,
            checked = scan.files.len(),
            issues = issues.len(),
            "validation complete"
        );

        CategoryValidation {
            category: root.category,
            checked: scan.files.len(),
            issues,
        }
    }

    /// Structural checks on one document
    #[must_use]
    pub fn check(doc: &ProfileDocument, required_fields: &[String]) -> Vec<Issue> {
        let mut issues = Vec::new();
        let path = || doc.path.clone();

        if !doc.fields.contains_key("name") {
            issues.push(Issue::MissingName(path()));
        }

        for field in STRING_FIELDS {
            if doc.fields.get(field).is_some_and(|value| !value.is_string()) {
                issues.push(Issue::InvalidField {
                    path: path(),
                    field: field.to_string(),
                });
            }
        }

        for field in required_fields {
            if !doc.fields.contains_key(field) {
                issues.push(Issue::MissingField {
                    path: path(),
                    field: field.clone(),
                });
            }
        }

        if let Some(base) = doc.inherits() {
            issues.push(Issue::Inherits {
                path: path(),
                base: base.to_string(),
            });
        }

        issues
    }
}

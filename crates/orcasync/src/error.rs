//! Error handling for the orcasync library
//!
//! Operations that can fail as a whole return [`Result`]. Failures that only
//! affect one file or one document are collected as [`Issue`] values next to
//! the primary result so the caller can decide what they mean for the exit
//! status.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// A failure scoped to a single file or document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// File could not be read or its metadata was unavailable
    #[error("cannot read {}: {reason}", .path.display())]
    UnreadableFile {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// Document is not a JSON object
    #[error("invalid JSON in {}: {reason}", .path.display())]
    InvalidJson {
        /// Offending file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Document has no `name` field and cannot be indexed
    #[error("{} has no 'name' field", .0.display())]
    MissingName(PathBuf),

    /// Document lacks a required top-level field
    #[error("{}: missing required field '{field}'", .path.display())]
    MissingField {
        /// Offending file
        path: PathBuf,
        /// Required field name
        field: String,
    },

    /// Structural field has a non-string value
    #[error("{}: field '{field}' must be a string", .path.display())]
    InvalidField {
        /// Offending file
        path: PathBuf,
        /// Field name
        field: String,
    },

    /// Profile still inherits from another profile
    #[error("{}: inherits from '{base}'", .path.display())]
    Inherits {
        /// Inheriting file
        path: PathBuf,
        /// Referenced base name
        base: String,
    },

    /// Referenced base profile is not indexed or no longer exists
    #[error("{}: base profile not found: '{base}'", .path.display())]
    BaseNotFound {
        /// Inheriting file
        path: PathBuf,
        /// Referenced base name
        base: String,
    },

    /// Referenced base profile could not be parsed
    #[error("{}: base profile '{base}' is unreadable: {reason}", .path.display())]
    BaseUnreadable {
        /// Inheriting file
        path: PathBuf,
        /// Referenced base name
        base: String,
        /// Load failure
        reason: String,
    },

    /// Inheritance chain loops back on itself
    #[error("{}: inheritance cycle: {}", .path.display(), .chain.join(" -> "))]
    InheritanceCycle {
        /// Document whose chain was being resolved
        path: PathBuf,
        /// Names walked before the loop closed
        chain: Vec<String>,
    },

    /// Two documents declare the same `name`; the later one wins
    #[error(
        "duplicate profile name '{name}': {} shadows {}",
        .kept.display(),
        .shadowed.display()
    )]
    DuplicateProfileName {
        /// Shared name
        name: String,
        /// File that owns the index entry
        kept: PathBuf,
        /// File that lost the index entry
        shadowed: PathBuf,
    },
}

impl Issue {
    /// File the issue is scoped to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::UnreadableFile { path, .. }
            | Self::InvalidJson { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidField { path, .. }
            | Self::Inherits { path, .. }
            | Self::BaseNotFound { path, .. }
            | Self::BaseUnreadable { path, .. }
            | Self::InheritanceCycle { path, .. } => path,
            Self::MissingName(path) => path,
            Self::DuplicateProfileName { kept, .. } => kept,
        }
    }

    /// Whether the issue is informational rather than a defect
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::Inherits { .. } | Self::DuplicateProfileName { .. } | Self::MissingName(_)
        )
    }

    pub(crate) fn unreadable(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::UnreadableFile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

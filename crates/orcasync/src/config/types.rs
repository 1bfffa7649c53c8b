//! Configuration types and structures

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Markers used when no configuration sets any
pub const DEFAULT_MARKERS: [&str; 2] = ["ODG_", "(ON)"];

/// Number of backups above which a cleanup warning is shown
pub const DEFAULT_BACKUP_WARNING_LIMIT: usize = 25;

/// Location overrides for the three profile trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathsConfig {
    /// OrcaSlicer user profile tree (holds filament/, machine/, process/)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dir: Option<PathBuf>,

    /// Version-controlled local mirror tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<PathBuf>,

    /// Directory holding timestamped backup snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Profile tree locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Managed-profile name markers (`[""]` matches every file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<String>>,

    /// Extension allow-list for sync scans (empty allows all)
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Patterns to ignore (exclude from scans)
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Patterns to explicitly include (override ignores)
    #[serde(default)]
    pub include: Vec<String>,

    /// Backup count that triggers a cleanup warning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_warning_limit: Option<usize>,

    /// Required top-level fields per category, checked by `validate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<BTreeMap<String, Vec<String>>>,

    /// Dry run mode (plan and report only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

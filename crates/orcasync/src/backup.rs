//! Timestamped, immutable snapshots of the OrcaSlicer user tree
//!
//! Layout: `<backup_dir>/<YYYY-MM-DD_HHMMSS>/default/<category>/...`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{Issue, Result};
use crate::profile::Category;
use crate::scanner::Scanner;
use crate::sync::{FileOperationExecutor, RecordStatus, SyncResult};

/// `strftime` format of snapshot ids
pub const SNAPSHOT_ID_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Tree folder name inside a snapshot
const PROFILE_TREE: &str = "default";

/// A snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Directory name (creation timestamp, maybe suffixed)
    pub id: String,
    /// Snapshot directory
    pub path: PathBuf,
}

impl Snapshot {
    /// Profile tree holding the category folders
    #[must_use]
    pub fn profile_root(&self) -> PathBuf {
        self.path.join(PROFILE_TREE)
    }
}

/// Result of taking a snapshot
#[derive(Debug, Clone)]
pub struct BackupReport {
    /// Snapshot written (or that would be written in dry-run mode)
    pub snapshot: Snapshot,
    /// Copied files
    pub result: SyncResult,
    /// Entries that could not be scanned
    pub issues: Vec<Issue>,
}

/// Snapshot directory manager
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    /// Store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backup directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot the files `scanner` selects in every category of `user_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot directory cannot be created.
    pub fn create(&self, user_dir: &Path, scanner: &Scanner, dry_run: bool) -> Result<BackupReport> {
        self.create_at(user_dir, scanner, dry_run, Local::now().naive_local())
    }

    /// [`Self::create`] with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot directory cannot be created.
    pub fn create_at(
        &self,
        user_dir: &Path,
        scanner: &Scanner,
        dry_run: bool,
        now: NaiveDateTime,
    ) -> Result<BackupReport> {
        let snapshot = self.allocate(&now.format(SNAPSHOT_ID_FORMAT).to_string());
        let tree = snapshot.profile_root();

        if !dry_run {
            fs::create_dir_all(&tree)
                .with_context(|| format!("Failed to create backup directory: {}", tree.display()))?;
        }

        let executor = FileOperationExecutor::new(dry_run);
        let mut result = SyncResult::default();
        let mut issues = Vec::new();

        for category in Category::ALL {
            let source = category.root_in(user_dir);
            let scan = scanner.scan(&source.path);
            executor.copy_files(
                category,
                &source.path,
                &category.root_in(&tree).path,
                &scan.files,
                &RecordStatus::BackedUp,
                &mut result,
            );
            issues.extend(scan.issues);
        }

        info!(
            snapshot = %snapshot.id,
            files = result.created,
            dry_run,
            "backup complete"
        );
        Ok(BackupReport {
            snapshot,
            result,
            issues,
        })
    }

    /// Snapshots, newest first; a missing backup directory lists as empty
    ///
    /// # Errors
    ///
    /// Returns an error if the backup directory cannot be read.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "backup directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read backup directory: {}", self.root.display()))?;

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to read backup directory: {}", self.root.display())
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            snapshots.push(Snapshot {
                id,
                path: entry.path(),
            });
        }

        snapshots.sort_by(|a, b| Self::order_key(&b.id).cmp(&Self::order_key(&a.id)));
        Ok(snapshots)
    }

    /// Number of snapshots
    ///
    /// # Errors
    ///
    /// Returns an error if the backup directory cannot be read.
    pub fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// Snapshot by id
    ///
    /// # Errors
    ///
    /// Returns an error if no snapshot has that id.
    pub fn find(&self, id: &str) -> Result<Snapshot> {
        self.list()?
            .into_iter()
            .find(|s| s.id == id)
            .with_context(|| format!("Backup not found: {id}"))
    }

    /// Timestamp and collision counter of a snapshot id; `2024-05-17_100000_10`
    /// sorts after `2024-05-17_100000_2`
    fn order_key(id: &str) -> (&str, u32) {
        match id.rsplit_once('_') {
            Some((base, n)) if base.contains('_') => {
                n.parse().map_or((id, 0), |n| (base, n))
            }
            _ => (id, 0),
        }
    }

    /// First free snapshot id starting from `base`
    fn allocate(&self, base: &str) -> Snapshot {
        let mut id = base.to_string();
        let mut n = 1;
        while self.root.join(&id).exists() {
            id = format!("{base}_{n}");
            n += 1;
        }

        Snapshot {
            path: self.root.join(&id),
            id,
        }
    }
}

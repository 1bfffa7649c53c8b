//! File operations executor

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use filetime::FileTime;
use tracing::{info, warn};

use super::SyncResult;
use super::actions::ActionKind;
use super::mirror::MirrorPlan;
use super::planner::TransferPlan;
use super::reporting::{RecordStatus, ReportRecord};
use crate::error::Result;
use crate::profile::Category;

/// Applies plans to the filesystem
///
/// Per-file failures are recorded in the [`SyncResult`] and the remaining
/// files are still processed.
pub struct FileOperationExecutor {
    dry_run: bool,
}

impl FileOperationExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Whether writes are suppressed
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute every action of a transfer plan from `src_root` into `dst_root`
    pub fn apply_transfer(
        &self,
        category: Category,
        plan: &mut TransferPlan,
        src_root: &Path,
        dst_root: &Path,
        result: &mut SyncResult,
    ) {
        for action in &mut plan.actions {
            let status = match action.kind {
                ActionKind::Create => RecordStatus::Created,
                ActionKind::Update => RecordStatus::Updated,
            };
            action.executed = self.copy_one(
                category,
                src_root,
                dst_root,
                &action.relative_path,
                status,
                result,
            );
        }

        for skipped in &plan.skipped {
            result.skipped += 1;
            result.records.push(ReportRecord::new(
                category,
                skipped.clone(),
                RecordStatus::Skipped,
            ));
        }
    }

    /// Execute a mirror plan: every deletion, then every copy
    pub fn apply_mirror(
        &self,
        category: Category,
        plan: &mut MirrorPlan,
        src_root: &Path,
        dst_root: &Path,
        result: &mut SyncResult,
    ) {
        self.delete_files(category, dst_root, &plan.deletions, result);

        for action in &mut plan.copies {
            action.executed = self.copy_one(
                category,
                src_root,
                dst_root,
                &action.relative_path,
                RecordStatus::Created,
                result,
            );
        }
    }

    /// Copy `files` (relative to `src_root`) into `dst_root`
    pub fn copy_files(
        &self,
        category: Category,
        src_root: &Path,
        dst_root: &Path,
        files: &[PathBuf],
        status: &RecordStatus,
        result: &mut SyncResult,
    ) {
        for relative in files {
            self.copy_one(category, src_root, dst_root, relative, status.clone(), result);
        }
    }

    /// Delete `files` (relative to `root`) and prune directories left empty
    pub fn delete_files(
        &self,
        category: Category,
        root: &Path,
        files: &[PathBuf],
        result: &mut SyncResult,
    ) {
        for relative in files {
            let path = root.join(relative);

            if self.dry_run {
                info!("[DRY RUN] Would delete: {}", path.display());
            } else if let Err(e) =
                fs::remove_file(&path).with_context(|| format!("Failed to delete {}", path.display()))
            {
                Self::record_error(result, relative, &e);
                continue;
            } else {
                info!(path = %path.display(), "deleted");
            }

            result.deleted += 1;
            result.records.push(ReportRecord::new(
                category,
                relative.clone(),
                RecordStatus::Deleted,
            ));
        }

        if !self.dry_run {
            Self::prune_empty_parents(root, files);
        }
    }

    /// Write `contents` to `root/relative`, replacing the file
    pub fn write_file(
        &self,
        record: ReportRecord,
        root: &Path,
        contents: &str,
        result: &mut SyncResult,
    ) {
        let path = root.join(&record.relative_path);

        if self.dry_run {
            info!("[DRY RUN] Would write: {}", path.display());
        } else if let Err(e) =
            fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
        {
            Self::record_error(result, &record.relative_path, &e);
            return;
        } else {
            info!(path = %path.display(), "written");
        }

        result.updated += 1;
        result.records.push(record);
    }

    fn copy_one(
        &self,
        category: Category,
        src_root: &Path,
        dst_root: &Path,
        relative: &Path,
        status: RecordStatus,
        result: &mut SyncResult,
    ) -> bool {
        let source = src_root.join(relative);
        let dest = dst_root.join(relative);

        if self.dry_run {
            info!("[DRY RUN] Would copy: {} -> {}", source.display(), dest.display());
        } else if let Err(e) = copy_preserving_mtime(&source, &dest) {
            Self::record_error(result, relative, &e);
            return false;
        } else {
            info!(from = %source.display(), to = %dest.display(), "copied");
        }

        match status {
            RecordStatus::Updated => result.updated += 1,
            _ => result.created += 1,
        }
        result.records.push(ReportRecord::new(
            category,
            relative.to_path_buf(),
            status,
        ));
        true
    }

    fn record_error(result: &mut SyncResult, relative: &Path, error: &anyhow::Error) {
        warn!(path = %relative.display(), error = %format!("{error:#}"), "file operation failed");
        result.errors.push(format!("{}: {error:#}", relative.display()));
    }

    /// Remove the directories of `files` left empty, walking up to (not
    /// including) `root`
    fn prune_empty_parents(root: &Path, files: &[PathBuf]) {
        for relative in files {
            let mut dir = relative.parent();
            while let Some(current) = dir.filter(|d| !d.as_os_str().is_empty()) {
                // Fails for non-empty directories, which stay
                if fs::remove_dir(root.join(current)).is_err() {
                    break;
                }
                dir = current.parent();
            }
        }
    }
}

/// Copy a file, creating parent directories and keeping its mtime
///
/// # Errors
///
/// Returns an error if the copy or the timestamp update fails.
pub fn copy_preserving_mtime(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::copy(source, dest).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            dest.display()
        )
    })?;

    let metadata = fs::metadata(source)
        .with_context(|| format!("Failed to read metadata for: {}", source.display()))?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&metadata))
        .with_context(|| format!("Failed to set modification time on {}", dest.display()))?;

    Ok(())
}

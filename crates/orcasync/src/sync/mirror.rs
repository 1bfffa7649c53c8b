//! Destructive mirror plans
//!
//! A mirror clears every file under the destination root, whatever its name,
//! then copies every file the source scanner selects. Deletions run before
//! any copy, and callers take a backup first.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::actions::{ActionKind, Direction, TransferAction};
use crate::error::Issue;
use crate::scanner::{ScanFilter, Scanner};

/// Deletions followed by copies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorPlan {
    /// Every file currently under the destination root
    pub deletions: Vec<PathBuf>,
    /// Every selected file under the source root
    pub copies: Vec<TransferAction>,
    /// Entries that could not be scanned
    pub issues: Vec<Issue>,
}

impl MirrorPlan {
    /// Whether the plan does nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.copies.is_empty()
    }

    /// Deleted files that no copy brings back
    pub fn stale(&self) -> impl Iterator<Item = &PathBuf> {
        let copied: BTreeSet<&PathBuf> = self.copies.iter().map(|c| &c.relative_path).collect();
        self.deletions.iter().filter(move |d| !copied.contains(d))
    }
}

/// Mirror planner
pub struct MirrorPlanner;

impl MirrorPlanner {
    /// Plan a mirror of `src_root` onto `dst_root`
    #[must_use]
    pub fn plan(
        src_root: &Path,
        dst_root: &Path,
        source_scanner: &Scanner,
        direction: Direction,
    ) -> MirrorPlan {
        let existing = Scanner::new(ScanFilter::everything()).scan(dst_root);
        let selected = source_scanner.scan(src_root);

        let mut plan = MirrorPlan {
            deletions: existing.files,
            copies: selected
                .files
                .into_iter()
                .map(|path| TransferAction::new(path, direction, ActionKind::Create))
                .collect(),
            issues: existing.issues,
        };
        plan.issues.extend(selected.issues);

        debug!(
            src = %src_root.display(),
            dst = %dst_root.display(),
            deletions = plan.deletions.len(),
            copies = plan.copies.len(),
            "mirror plan built"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::MarkerSet;
    use std::fs;
    use tempfile::TempDir;

    fn managed() -> Scanner {
        Scanner::new(ScanFilter::new(MarkerSet::new(["ODG_"])))
    }

    #[test]
    fn test_empty_destination_has_no_deletions() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("ODG_a.json"), "{}").unwrap();
        fs::write(src.path().join("ODG_b.json"), "{}").unwrap();

        let plan = MirrorPlanner::plan(src.path(), dst.path(), &managed(), Direction::BToA);

        assert!(plan.deletions.is_empty());
        assert_eq!(plan.copies.len(), 2);
        assert!(plan.copies.iter().all(|c| c.kind == ActionKind::Create));
    }

    #[test]
    fn test_stale_destination_files_are_deleted_regardless_of_markers() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("ODG_a.json"), "{}").unwrap();
        fs::write(dst.path().join("ODG_a.json"), "{}").unwrap();
        fs::write(dst.path().join("user_made.json"), "{}").unwrap();

        let plan = MirrorPlanner::plan(src.path(), dst.path(), &managed(), Direction::BToA);

        assert_eq!(
            plan.deletions,
            vec![PathBuf::from("ODG_a.json"), PathBuf::from("user_made.json")]
        );
        assert_eq!(plan.copies.len(), 1);
        let stale: Vec<_> = plan.stale().collect();
        assert_eq!(stale, vec![&PathBuf::from("user_made.json")]);
    }

    #[test]
    fn test_missing_source_plans_only_deletions() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("dst");
        fs::create_dir(&dst).unwrap();
        fs::write(dst.join("ODG_a.json"), "{}").unwrap();

        let plan = MirrorPlanner::plan(&tmp.path().join("src"), &dst, &managed(), Direction::AToB);

        assert_eq!(plan.deletions.len(), 1);
        assert!(plan.copies.is_empty());
        assert!(!plan.is_empty());
    }
}

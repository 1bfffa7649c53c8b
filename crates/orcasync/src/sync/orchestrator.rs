//! Sync orchestration - one engine method per profile operation
//!
//! Every mutating operation follows the same shape: plan without touching the
//! filesystem, ask the approver, take a backup when the OrcaSlicer tree is
//! about to change, then execute. Operations that need a backup call
//! [`SyncEngine::backup`] directly.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};

use super::SyncResult;
use super::actions::{ActionKind, Direction};
use super::executor::FileOperationExecutor;
use super::mirror::{MirrorPlan, MirrorPlanner};
use super::planner::{PlanOutcome, TransferPlan, TransferPlanner, TransferPolicy};
use super::reporting::{RecordStatus, ReportRecord};
use crate::backup::{BackupReport, BackupStore, Snapshot};
use crate::comparison::{CompareMode, Comparison, TimestampComparator, TreeComparator};
use crate::config::Settings;
use crate::error::{Issue, Result};
use crate::inheritance::{FlattenDepth, Flattener};
use crate::profile::Category;
use crate::scanner::{ScanFilter, Scanner};
use crate::validation::{CategoryValidation, ProfileValidator};

/// Approval callback consulted once per operation, before any write
///
/// `Ok(false)` declines the operation; an error aborts it.
pub type ApprovalCallback = Box<dyn FnMut(&Proposal) -> Result<bool>>;

/// Mutating operation awaiting approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// OrcaSlicer → local mirror
    Fetch,
    /// Replace the OrcaSlicer tree with the local mirror
    Push,
    /// Copy newer local profiles into OrcaSlicer
    PushMerge,
    /// Replace the OrcaSlicer tree with a snapshot
    Restore {
        /// Snapshot id
        snapshot: String,
    },
    /// Delete managed profiles from OrcaSlicer
    Clean,
    /// Rewrite inheriting profiles as standalone documents
    Flatten,
}

impl Operation {
    /// Short name for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Push => "push",
            Self::PushMerge => "push --merge",
            Self::Restore { .. } => "restore",
            Self::Clean => "clean",
            Self::Flatten => "flatten",
        }
    }

    /// Confirmation question
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::Fetch => "Continue with fetch?".to_string(),
            Self::Push => {
                "Back up and replace OrcaSlicer profiles with the local mirror?".to_string()
            }
            Self::PushMerge => "Back up and copy local profiles into OrcaSlicer?".to_string(),
            Self::Restore { snapshot } => {
                format!("This will overwrite current OrcaSlicer profiles with backup {snapshot}. Continue?")
            }
            Self::Clean => "Back up and delete all managed profiles from OrcaSlicer?".to_string(),
            Self::Flatten => "Proceed with flattening and overwrite OrcaSlicer files?".to_string(),
        }
    }
}

/// What an operation is about to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// Operation asking for approval
    pub operation: Operation,
    /// Planned changes, grouped by category
    pub records: Vec<ReportRecord>,
}

/// How an operation ended
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Plan executed (or simulated in dry-run mode)
    Completed(SyncResult),
    /// Nothing to do
    UpToDate,
    /// Destination-newer entries block the transfer; re-run with force or skip
    Held(Vec<ReportRecord>),
    /// Approver said no; nothing was changed
    Declined,
}

/// Outcome plus everything collected on the way
#[derive(Debug, Clone)]
pub struct OperationReport {
    /// How the operation ended
    pub outcome: SyncOutcome,
    /// Snapshot taken before writing, if any
    pub backup: Option<Snapshot>,
    /// Scoped problems found while planning
    pub issues: Vec<Issue>,
}

impl OperationReport {
    fn new(outcome: SyncOutcome, issues: Vec<Issue>) -> Self {
        Self {
            outcome,
            backup: None,
            issues,
        }
    }

    /// Execution result, if the plan ran
    #[must_use]
    pub const fn result(&self) -> Option<&SyncResult> {
        match &self.outcome {
            SyncOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Comparison of one category folder, user (A) against local (B)
#[derive(Debug, Clone)]
pub struct CategoryComparison {
    /// Category compared
    pub category: Category,
    /// Entries and issues
    pub comparison: Comparison,
}

/// A managed profile in the OrcaSlicer tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileListing {
    /// Category folder
    pub category: Category,
    /// Path relative to the category folder
    pub relative_path: PathBuf,
    /// Last modification time, if readable
    pub modified: Option<SystemTime>,
}

/// Main sync engine
#[derive(Debug, Clone)]
pub struct SyncEngine {
    settings: Settings,
}

impl SyncEngine {
    /// Create a new sync engine
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Settings every operation runs with
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    fn managed_scanner(&self) -> Scanner {
        Scanner::new(self.settings.managed_filter())
    }

    fn user_root(&self, category: Category) -> PathBuf {
        category.root_in(&self.settings.user_dir).path
    }

    fn local_root(&self, category: Category) -> PathBuf {
        category.root_in(&self.settings.local_dir).path
    }

    fn backup_store(&self) -> BackupStore {
        BackupStore::new(&self.settings.backup_dir)
    }

    /// Compare user (A) and local (B) per category
    #[must_use]
    pub fn status(&self, mode: CompareMode, name_filter: Option<&str>) -> Vec<CategoryComparison> {
        let scanner = Scanner::new(self.settings.managed_filter().with_name_filter(name_filter));
        let comparator = TreeComparator::new(scanner, mode);

        Category::ALL
            .into_iter()
            .map(|category| CategoryComparison {
                category,
                comparison: comparator
                    .compare(&self.user_root(category), &self.local_root(category)),
            })
            .collect()
    }

    /// Copy OrcaSlicer profiles into the local mirror
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails.
    pub fn fetch(
        &self,
        name_filter: Option<&str>,
        policy: TransferPolicy,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        self.transfer(Operation::Fetch, Direction::AToB, name_filter, policy, approver)
    }

    /// Copy local profiles into OrcaSlicer without deleting anything
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails or the backup cannot be taken.
    pub fn push_merge(
        &self,
        policy: TransferPolicy,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        self.transfer(Operation::PushMerge, Direction::BToA, None, policy, approver)
    }

    fn transfer(
        &self,
        operation: Operation,
        direction: Direction,
        name_filter: Option<&str>,
        policy: TransferPolicy,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        let mut issues = Vec::new();
        let mut plans: Vec<(Category, TransferPlan)> = Vec::new();
        let mut held = Vec::new();

        for CategoryComparison {
            category,
            comparison,
        } in self.status(CompareMode::Timestamp, name_filter)
        {
            issues.extend(comparison.issues);
            match TransferPlanner::plan(&comparison.entries, direction, policy) {
                PlanOutcome::Ready(plan) => plans.push((category, plan)),
                PlanOutcome::Held { divergent, .. } => held.extend(
                    divergent
                        .into_iter()
                        .map(|path| ReportRecord::new(category, path, RecordStatus::Held)),
                ),
            }
        }

        if !held.is_empty() {
            warn!(
                operation = operation.label(),
                held = held.len(),
                "destination is newer; transfer held"
            );
            return Ok(OperationReport::new(SyncOutcome::Held(held), issues));
        }

        let records: Vec<ReportRecord> = plans
            .iter()
            .flat_map(|(category, plan)| Self::transfer_records(*category, plan))
            .collect();
        if records.is_empty() {
            return Ok(OperationReport::new(SyncOutcome::UpToDate, issues));
        }

        if !self.approve(operation, records, approver)? {
            return Ok(OperationReport::new(SyncOutcome::Declined, issues));
        }

        let mut report = OperationReport::new(SyncOutcome::UpToDate, issues);
        if direction == Direction::BToA {
            report.backup = self.backup_before_write(&self.managed_scanner(), &mut report.issues)?;
        }

        let executor = FileOperationExecutor::new(self.settings.dry_run);
        let mut result = SyncResult::default();
        for (category, plan) in &mut plans {
            let user = self.user_root(*category);
            let local = self.local_root(*category);
            let (src, dst) = direction.endpoints(&user, &local);
            executor.apply_transfer(*category, plan, src, dst, &mut result);
        }

        report.outcome = SyncOutcome::Completed(result);
        Ok(report)
    }

    fn transfer_records(category: Category, plan: &TransferPlan) -> Vec<ReportRecord> {
        let actions = plan.actions.iter().map(|action| {
            let status = match action.kind {
                ActionKind::Create => RecordStatus::Created,
                ActionKind::Update => RecordStatus::Updated,
            };
            ReportRecord::new(category, action.relative_path.clone(), status)
        });
        let skipped = plan
            .skipped
            .iter()
            .map(|path| ReportRecord::new(category, path.clone(), RecordStatus::Skipped));
        actions.chain(skipped).collect()
    }

    /// Back up, then replace every OrcaSlicer category folder with the local mirror
    ///
    /// The backup holds every file in those folders, managed or not, since the
    /// mirror deletes them all.
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails or the backup cannot be taken.
    pub fn push(&self, approver: Option<ApprovalCallback>) -> Result<OperationReport> {
        let local_dir = self.settings.local_dir.clone();
        self.mirror(Operation::Push, &local_dir, &self.managed_scanner(), approver)
    }

    /// Replace every OrcaSlicer category folder with a snapshot's contents
    ///
    /// Every file in the snapshot is restored, managed or not. The current
    /// tree is backed up first.
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails or the backup cannot be taken.
    pub fn restore(
        &self,
        snapshot: &Snapshot,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        let operation = Operation::Restore {
            snapshot: snapshot.id.clone(),
        };
        let scanner = Scanner::new(ScanFilter::everything());
        self.mirror(operation, &snapshot.profile_root(), &scanner, approver)
    }

    fn mirror(
        &self,
        operation: Operation,
        source_tree: &Path,
        scanner: &Scanner,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        let mut issues = Vec::new();
        let mut plans: Vec<(Category, MirrorPlan)> = Category::ALL
            .into_iter()
            .map(|category| {
                let mut plan = MirrorPlanner::plan(
                    &category.root_in(source_tree).path,
                    &self.user_root(category),
                    scanner,
                    Direction::BToA,
                );
                issues.append(&mut plan.issues);
                (category, plan)
            })
            .collect();

        if plans.iter().all(|(_, plan)| plan.is_empty()) {
            return Ok(OperationReport::new(SyncOutcome::UpToDate, issues));
        }

        let records = plans
            .iter()
            .flat_map(|(category, plan)| {
                let stale = plan.stale().map(|path| {
                    ReportRecord::new(*category, path.clone(), RecordStatus::Deleted)
                });
                let copies = plan.copies.iter().map(|action| {
                    ReportRecord::new(*category, action.relative_path.clone(), RecordStatus::Created)
                });
                stale.chain(copies).collect::<Vec<_>>()
            })
            .collect();

        if !self.approve(operation, records, approver)? {
            return Ok(OperationReport::new(SyncOutcome::Declined, issues));
        }

        let mut report = OperationReport::new(SyncOutcome::UpToDate, issues);
        let everything = Scanner::new(ScanFilter::everything());
        report.backup = self.backup_before_write(&everything, &mut report.issues)?;

        let executor = FileOperationExecutor::new(self.settings.dry_run);
        let mut result = SyncResult::default();
        for (category, plan) in &mut plans {
            let src = category.root_in(source_tree).path;
            let dst = self.user_root(*category);
            executor.apply_mirror(*category, plan, &src, &dst, &mut result);
        }

        report.outcome = SyncOutcome::Completed(result);
        Ok(report)
    }

    /// Back up, then delete every managed profile from the OrcaSlicer tree
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails or the backup cannot be taken.
    pub fn clean(&self, approver: Option<ApprovalCallback>) -> Result<OperationReport> {
        let scanner = self.managed_scanner();
        let mut issues = Vec::new();
        let mut targets = Vec::new();

        for category in Category::ALL {
            let scan = scanner.scan(&self.user_root(category));
            issues.extend(scan.issues);
            if !scan.files.is_empty() {
                targets.push((category, scan.files));
            }
        }

        if targets.is_empty() {
            return Ok(OperationReport::new(SyncOutcome::UpToDate, issues));
        }

        let records = targets
            .iter()
            .flat_map(|(category, files)| {
                files.iter().map(move |path| {
                    ReportRecord::new(*category, path.clone(), RecordStatus::Deleted)
                })
            })
            .collect();

        if !self.approve(Operation::Clean, records, approver)? {
            return Ok(OperationReport::new(SyncOutcome::Declined, issues));
        }

        let mut report = OperationReport::new(SyncOutcome::UpToDate, issues);
        report.backup = self.backup_before_write(&scanner, &mut report.issues)?;

        let executor = FileOperationExecutor::new(self.settings.dry_run);
        let mut result = SyncResult::default();
        for (category, files) in &targets {
            executor.delete_files(*category, &self.user_root(*category), files, &mut result);
        }

        report.outcome = SyncOutcome::Completed(result);
        Ok(report)
    }

    /// Back up, then overwrite inheriting profiles with their flattened form
    ///
    /// Only the given categories are visited, in [`Category::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if the approver fails, the backup cannot be taken, or
    /// a merged document cannot be serialized.
    pub fn flatten(
        &self,
        categories: &[Category],
        depth: FlattenDepth,
        approver: Option<ApprovalCallback>,
    ) -> Result<OperationReport> {
        let flattener = Flattener::new(depth);
        let mut issues = Vec::new();
        let mut pending = Vec::new();

        for category in Category::ALL
            .into_iter()
            .filter(|c| categories.contains(c))
        {
            let report = flattener.flatten_dir(&self.user_root(category));
            issues.extend(report.issues);

            for flattened in report.results {
                let added = if flattened.added_keys.is_empty() {
                    "(none)".to_string()
                } else {
                    flattened
                        .added_keys
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                let record = ReportRecord::new(
                    category,
                    flattened.relative_path.clone(),
                    RecordStatus::Flattened,
                )
                .with_note(format!("inherits: {}; adds: {added}", flattened.base_name));
                pending.push((record, flattened.to_pretty_json()?));
            }
        }

        if pending.is_empty() {
            return Ok(OperationReport::new(SyncOutcome::UpToDate, issues));
        }

        let records = pending.iter().map(|(record, _)| record.clone()).collect();
        if !self.approve(Operation::Flatten, records, approver)? {
            return Ok(OperationReport::new(SyncOutcome::Declined, issues));
        }

        let mut report = OperationReport::new(SyncOutcome::UpToDate, issues);
        report.backup = self.backup_before_write(&self.managed_scanner(), &mut report.issues)?;

        let executor = FileOperationExecutor::new(self.settings.dry_run);
        let mut result = SyncResult::default();
        for (record, contents) in pending {
            let root = self.user_root(record.category);
            executor.write_file(record, &root, &contents, &mut result);
        }

        report.outcome = SyncOutcome::Completed(result);
        Ok(report)
    }

    /// Structural checks of managed profiles, per category
    #[must_use]
    pub fn validate(&self) -> Vec<CategoryValidation> {
        let validator = ProfileValidator::new(self.settings.markers.clone());
        Category::ALL
            .into_iter()
            .map(|category| {
                validator.validate(
                    &category.root_in(&self.settings.user_dir),
                    self.settings.required_fields_for(category),
                )
            })
            .collect()
    }

    /// Managed profiles in the OrcaSlicer tree, with modification times
    #[must_use]
    pub fn list(&self) -> (Vec<ProfileListing>, Vec<Issue>) {
        let scanner = self.managed_scanner();
        let mut profiles = Vec::new();
        let mut issues = Vec::new();

        for category in Category::ALL {
            let root = self.user_root(category);
            let scan = scanner.scan(&root);
            issues.extend(scan.issues);
            profiles.extend(scan.files.into_iter().map(|relative_path| ProfileListing {
                modified: TimestampComparator::get_modified_time(&root.join(&relative_path)).ok(),
                category,
                relative_path,
            }));
        }

        (profiles, issues)
    }

    /// Snapshot the managed OrcaSlicer profiles
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot directory cannot be created.
    pub fn backup(&self) -> Result<BackupReport> {
        self.backup_store().create(
            &self.settings.user_dir,
            &self.managed_scanner(),
            self.settings.dry_run,
        )
    }

    /// Snapshots, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the backup directory cannot be read.
    pub fn backups(&self) -> Result<Vec<Snapshot>> {
        self.backup_store().list()
    }

    /// Snapshot by id
    ///
    /// # Errors
    ///
    /// Returns an error if no snapshot has that id.
    pub fn find_snapshot(&self, id: &str) -> Result<Snapshot> {
        self.backup_store().find(id)
    }

    /// Snapshot count when it exceeds the configured warning limit
    ///
    /// # Errors
    ///
    /// Returns an error if the backup directory cannot be read.
    pub fn backup_warning(&self) -> Result<Option<usize>> {
        let count = self.backup_store().count()?;
        Ok((count > self.settings.backup_warning_limit).then_some(count))
    }

    fn approve(
        &self,
        operation: Operation,
        records: Vec<ReportRecord>,
        approver: Option<ApprovalCallback>,
    ) -> Result<bool> {
        if self.settings.dry_run {
            return Ok(true);
        }
        let Some(mut approve) = approver else {
            return Ok(true);
        };

        let proposal = Proposal { operation, records };
        let approved = approve(&proposal)?;
        if !approved {
            info!(operation = proposal.operation.label(), "operation declined");
        }
        Ok(approved)
    }

    /// Backup of the files `scanner` selects, taken before the OrcaSlicer tree
    /// changes; skipped in dry-run mode
    fn backup_before_write(
        &self,
        scanner: &Scanner,
        issues: &mut Vec<Issue>,
    ) -> Result<Option<Snapshot>> {
        if self.settings.dry_run {
            return Ok(None);
        }

        let mut report = self
            .backup_store()
            .create(&self.settings.user_dir, scanner, false)?;
        issues.append(&mut report.issues);
        if !report.result.is_success() {
            anyhow::bail!(
                "Backup {} failed with {} error(s); nothing was changed:\n  - {}",
                report.snapshot.id,
                report.result.errors.len(),
                report.result.errors.join("\n  - ")
            );
        }
        Ok(Some(report.snapshot))
    }
}

//! Profile synchronization engine
//!
//! Planning and execution are separate steps. The planners
//! ([`TransferPlanner`], [`MirrorPlanner`]) only read the filesystem; the
//! [`FileOperationExecutor`] applies a plan once the [`SyncEngine`] has
//! obtained approval and, when the OrcaSlicer tree is about to change, a
//! backup snapshot.

mod actions;
mod executor;
mod mirror;
mod orchestrator;
mod planner;
mod reporting;


pub use actions::{ActionKind, Direction, TransferAction};
pub use executor::{FileOperationExecutor, copy_preserving_mtime};
pub use mirror::{MirrorPlan, MirrorPlanner};
pub use orchestrator::{
    ApprovalCallback, CategoryComparison, Operation, OperationReport, ProfileListing, Proposal,
    SyncEngine, SyncOutcome,
};
pub use planner::{PlanOutcome, TransferPlan, TransferPlanner, TransferPolicy};
pub use reporting::{RecordStatus, ReportRecord, SyncReporter};

/// Synchronization result with statistics
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Files created
    pub created: usize,
    /// Files updated
    pub updated: usize,
    /// Files deleted
    pub deleted: usize,
    /// Files skipped
    pub skipped: usize,
    /// Errors encountered
    pub errors: Vec<String>,
    /// Per-file records in execution order
    pub records: Vec<ReportRecord>,
}

impl SyncResult {
    /// Total operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    /// Whether sync was successful (no errors)
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

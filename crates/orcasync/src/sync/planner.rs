//! Turns a comparison into a transfer plan
//!
//! The planner never touches the filesystem and never deletes: `only_b`
//! entries (destination-only files) produce no action. Entries where the
//! destination is ahead are held back unless the policy forces or skips them.

use std::path::PathBuf;

use tracing::debug;

use super::actions::{ActionKind, Direction, TransferAction};
use crate::comparison::{ComparisonEntry, EntryStatus};

/// How diverged entries are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferPolicy {
    /// Overwrite destinations that are newer than the source
    pub force: bool,
    /// Drop destination-newer entries from the plan instead of holding it
    pub skip_divergent: bool,
}

impl TransferPolicy {
    /// Policy that overwrites diverged destinations
    #[must_use]
    pub const fn forced() -> Self {
        Self {
            force: true,
            skip_divergent: false,
        }
    }

    /// Policy that leaves diverged destinations untouched
    #[must_use]
    pub const fn skipping() -> Self {
        Self {
            force: false,
            skip_divergent: true,
        }
    }
}

/// Ordered list of copies for one pair of roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Copy direction
    pub direction: Direction,
    /// Copies in relative-path order
    pub actions: Vec<TransferAction>,
    /// Diverged entries dropped by `skip_divergent`
    pub skipped: Vec<PathBuf>,
}

impl TransferPlan {
    /// Empty plan
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            actions: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Whether the plan copies nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Planner result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Plan can be executed
    Ready(TransferPlan),
    /// Destination-newer entries block the plan until the caller re-plans
    /// with `force` or `skip_divergent`
    Held {
        /// Actions that would run once the divergence is resolved
        plan: TransferPlan,
        /// Entries whose destination copy is ahead of the source
        divergent: Vec<PathBuf>,
    },
}

/// Transfer planner
pub struct TransferPlanner;

impl TransferPlanner {
    /// Plan copies for `entries` in `direction` under `policy`
    #[must_use]
    pub fn plan(
        entries: &[ComparisonEntry],
        direction: Direction,
        policy: TransferPolicy,
    ) -> PlanOutcome {
        let mut plan = TransferPlan::new(direction);
        let mut divergent = Vec::new();

        for entry in entries {
            let kind = match direction.from_source(entry.status) {
                EntryStatus::OnlyA => ActionKind::Create,
                EntryStatus::OnlyB | EntryStatus::Same => continue,
                EntryStatus::ANewer => ActionKind::Update,
                EntryStatus::BNewer | EntryStatus::Differs => {
                    if policy.force {
                        ActionKind::Update
                    } else if policy.skip_divergent {
                        plan.skipped.push(entry.relative_path.clone());
                        continue;
                    } else {
                        divergent.push(entry.relative_path.clone());
                        continue;
                    }
                }
            };

            plan.actions.push(TransferAction::new(
                entry.relative_path.clone(),
                direction,
                kind,
            ));
        }

        debug!(
            ?direction,
            actions = plan.actions.len(),
            skipped = plan.skipped.len(),
            held = divergent.len(),
            "transfer plan built"
        );

        if divergent.is_empty() {
            PlanOutcome::Ready(plan)
        } else {
            PlanOutcome::Held { plan, divergent }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, status: EntryStatus) -> ComparisonEntry {
        ComparisonEntry {
            relative_path: PathBuf::from(path),
            in_a: status != EntryStatus::OnlyB,
            in_b: status != EntryStatus::OnlyA,
            status,
        }
    }

    fn ready(outcome: PlanOutcome) -> TransferPlan {
        match outcome {
            PlanOutcome::Ready(plan) => plan,
            PlanOutcome::Held { divergent, .. } => panic!("unexpectedly held: {divergent:?}"),
        }
    }

    #[test]
    fn test_same_entries_produce_empty_plan_both_ways() {
        let entries = vec![entry("a.json", EntryStatus::Same), entry("b.json", EntryStatus::Same)];

        for direction in [Direction::AToB, Direction::BToA] {
            let plan = ready(TransferPlanner::plan(&entries, direction, TransferPolicy::default()));
            assert!(plan.is_empty());
        }
    }

    #[test]
    fn test_only_a_is_created() {
        let entries = vec![entry("new.json", EntryStatus::OnlyA)];
        let plan = ready(TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::default()));

        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.actions[0].relative_path, PathBuf::from("new.json"));
        assert_eq!(plan.actions[0].kind, ActionKind::Create);
    }

    #[test]
    fn test_only_b_is_never_deleted_or_copied() {
        let entries = vec![entry("stale.json", EntryStatus::OnlyB)];
        let plan = ready(TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::forced()));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_source_newer_updates_without_force() {
        let entries = vec![entry("x.json", EntryStatus::ANewer)];
        let plan = ready(TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::default()));
        assert_eq!(plan.actions[0].kind, ActionKind::Update);
    }

    #[test]
    fn test_destination_newer_is_held() {
        let entries = vec![
            entry("a.json", EntryStatus::OnlyA),
            entry("x.json", EntryStatus::BNewer),
        ];

        match TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::default()) {
            PlanOutcome::Held { plan, divergent } => {
                assert_eq!(divergent, vec![PathBuf::from("x.json")]);
                assert_eq!(plan.actions.len(), 1);
                assert!(plan.actions.iter().all(|a| !a.executed));
            }
            PlanOutcome::Ready(_) => panic!("expected held plan"),
        }
    }

    #[test]
    fn test_force_overrides_divergence() {
        let entries = vec![entry("x.json", EntryStatus::BNewer)];
        let plan = ready(TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::forced()));
        assert_eq!(plan.actions[0].kind, ActionKind::Update);
    }

    #[test]
    fn test_skip_divergent_drops_only_warned_entries() {
        let entries = vec![
            entry("a.json", EntryStatus::ANewer),
            entry("x.json", EntryStatus::BNewer),
        ];
        let plan = ready(TransferPlanner::plan(&entries, Direction::AToB, TransferPolicy::skipping()));

        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.actions[0].relative_path, PathBuf::from("a.json"));
        assert_eq!(plan.skipped, vec![PathBuf::from("x.json")]);
    }

    #[test]
    fn test_b_to_a_is_symmetric() {
        let entries = vec![
            entry("only_b.json", EntryStatus::OnlyB),
            entry("only_a.json", EntryStatus::OnlyA),
            entry("a_newer.json", EntryStatus::ANewer),
        ];

        match TransferPlanner::plan(&entries, Direction::BToA, TransferPolicy::default()) {
            PlanOutcome::Held { plan, divergent } => {
                assert_eq!(divergent, vec![PathBuf::from("a_newer.json")]);
                assert_eq!(plan.actions.len(), 1);
                assert_eq!(plan.actions[0].relative_path, PathBuf::from("only_b.json"));
                assert_eq!(plan.actions[0].direction, Direction::BToA);
            }
            PlanOutcome::Ready(_) => panic!("expected held plan"),
        }
    }

    #[test]
    fn test_differs_needs_force_in_either_direction() {
        let entries = vec![entry("x.json", EntryStatus::Differs)];
        for direction in [Direction::AToB, Direction::BToA] {
            assert!(matches!(
                TransferPlanner::plan(&entries, direction, TransferPolicy::default()),
                PlanOutcome::Held { .. }
            ));
        }
    }
}

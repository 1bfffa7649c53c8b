//! Transfer actions produced by the planners

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::comparison::EntryStatus;

/// Transfer direction between roots A and B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Copy from A into B
    AToB,
    /// Copy from B into A
    BToA,
}

impl Direction {
    /// `(source, destination)` roots for this direction
    #[must_use]
    pub fn endpoints<'a>(self, a: &'a Path, b: &'a Path) -> (&'a Path, &'a Path) {
        match self {
            Self::AToB => (a, b),
            Self::BToA => (b, a),
        }
    }

    /// Rewrite an A/B status so that "A" means the source of this direction
    #[must_use]
    pub const fn from_source(self, status: EntryStatus) -> EntryStatus {
        match self {
            Self::AToB => status,
            Self::BToA => status.swapped(),
        }
    }
}

/// What a copy does at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Destination file does not exist yet
    Create,
    /// Destination file is replaced
    Update,
}

/// A single planned copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAction {
    /// Path relative to both roots
    pub relative_path: PathBuf,
    /// Copy direction
    pub direction: Direction,
    /// Create or update
    pub kind: ActionKind,
    /// Set once the copy has been performed
    pub executed: bool,
}

impl TransferAction {
    /// New, not yet executed action
    #[must_use]
    pub const fn new(relative_path: PathBuf, direction: Direction, kind: ActionKind) -> Self {
        Self {
            relative_path,
            direction,
            kind,
            executed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let (a, b) = (Path::new("/user"), Path::new("/local"));
        assert_eq!(Direction::AToB.endpoints(a, b), (a, b));
        assert_eq!(Direction::BToA.endpoints(a, b), (b, a));
    }

    #[test]
    fn test_from_source_swaps_for_b_to_a() {
        assert_eq!(
            Direction::BToA.from_source(EntryStatus::OnlyB),
            EntryStatus::OnlyA
        );
        assert_eq!(
            Direction::AToB.from_source(EntryStatus::BNewer),
            EntryStatus::BNewer
        );
    }

    #[test]
    fn test_new_action_is_pending() {
        let action = TransferAction::new(
            PathBuf::from("ODG_PLA.json"),
            Direction::AToB,
            ActionKind::Create,
        );
        assert!(!action.executed);
    }
}

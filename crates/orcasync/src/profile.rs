//! Profile categories
//!
//! Every profile tree (the OrcaSlicer user directory, the local mirror and
//! each backup snapshot) holds the same three category folders.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Profile category, one folder per category under a tree root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Filament profiles
    Filament,
    /// Machine (printer) profiles
    Machine,
    /// Process (print settings) profiles
    Process,
}

impl Category {
    /// All categories in the order every operation visits them
    pub const ALL: [Self; 3] = [Self::Filament, Self::Machine, Self::Process];

    /// Folder name of the category
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Filament => "filament",
            Self::Machine => "machine",
            Self::Process => "process",
        }
    }

    /// Category folder under a tree root
    #[must_use]
    pub fn root_in(self, tree: &Path) -> ProfileRoot {
        ProfileRoot {
            path: tree.join(self.dir_name()),
            category: self,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.dir_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown profile category: '{s}'"))
    }
}

/// A category folder inside a profile tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRoot {
    /// Absolute folder path
    pub path: PathBuf,
    /// Category the folder holds
    pub category: Category,
}

//! # orcasync
//!
//! Core library for OrcaSlicer profile synchronization.
//!
//! This library discovers managed slicer profiles (filament, machine and
//! process JSON files marked by name), compares the OrcaSlicer user directory
//! with a version-controlled local mirror, plans safe or forced transfers
//! between the two, keeps timestamped backups, and flattens profile
//! inheritance chains.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error and issue types
pub mod error;

/// Profile categories and category roots
pub mod profile;

/// Managed profile discovery
pub mod scanner;

/// Tree comparison and divergence classification
pub mod comparison;

/// Configuration file parsing and management
pub mod config;

/// Transfer planning, mirroring and execution
pub mod sync;

/// Timestamped profile snapshots
pub mod backup;

/// Profile inheritance resolution
pub mod inheritance;

/// Structural profile checks
pub mod validation;

pub use config::{Config, Settings};
pub use error::{Issue, Result};
pub use profile::Category;
pub use sync::SyncEngine;

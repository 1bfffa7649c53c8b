//! Profile inheritance resolution
//!
//! OrcaSlicer profiles may declare `"inherits": "<name>"` to pull every field
//! they do not set themselves from another profile. Flattening resolves that
//! reference, merges base fields under the child's overrides and drops the
//! `inherits` key so the profile becomes standalone.
//!
//! ```text
//! base  {"name":"B","a":1,"b":2}
//! child {"name":"C","inherits":"B","b":3}
//! flat  {"name":"C","a":1,"b":3}      added keys: {"a"}
//! ```

mod document;
mod flatten;
mod index;

#[cfg(test)]
mod integration_tests;

pub use document::ProfileDocument;
pub use flatten::{FlattenDepth, FlattenReport, FlattenResult, Flattener};
pub use index::InheritanceIndex;

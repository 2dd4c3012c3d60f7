//! Drift detection between runs.
//!
//! - [`changed_files`] - manual edits to previously generated files
//! - [`DependencyCheck`] - consumer code referencing stale interfaces
//! - [`fingerprint`] - per-model shape hashes recorded in generated docs

mod dependency;
mod edits;
pub mod fingerprint;

pub use dependency::{
    DependencyCheck, DependencyUsageRecord, DependencyVerdict, StaleInterface, StaleReason,
    same_project, scan_references, stale_interfaces,
};
pub use edits::{ChangedFile, changed_files};

//! Manual-edit check over previously generated files.

use std::path::PathBuf;

use rapper_core::{ExistingFile, MarkerStatus};

/// A generated file whose body no longer matches its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: PathBuf,
    pub recorded: String,
    pub actual: String,
}

/// Files whose recomputed hash differs from the recorded one.
pub fn changed_files(existing: &[ExistingFile]) -> Vec<ChangedFile> {
    existing
        .iter()
        .filter_map(|file| match file.status() {
            MarkerStatus::Changed { recorded, actual } => Some(ChangedFile {
                path: file.path.clone(),
                recorded,
                actual,
            }),
            MarkerStatus::Intact | MarkerStatus::Unmarked => None,
        })
        .collect()
}

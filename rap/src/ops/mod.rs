//! Core operations.
//!
//! This module contains the business logic for rapper commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod sync;
#[cfg(test)]
mod testing;
pub mod update;

use std::path::{Path, PathBuf};

pub use check::{CheckOptions, check};
use eyre::Result;
use rapper_codegen::{
    Normalized,
    drift::{DependencyCheck, DependencyVerdict},
    normalize,
};
use rapper_core::ExistingFile;
use rapper_ir::Interface;
use rapper_manifest::Manifest;
pub use sync::{SyncOptions, sync};
pub use update::upgrade_hint;
use tracing::info;

use crate::catalog::Catalog;

/// Manifest paths resolved against the directory holding the manifest.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub output_dir: PathBuf,
    pub scan_dirs: Vec<PathBuf>,
}

impl Layout {
    pub fn resolve(manifest: &Manifest, root: &Path) -> Self {
        Self {
            output_dir: root.join(&manifest.rapper.output),
            scan_dirs: manifest
                .rapper
                .scan_dirs
                .iter()
                .map(|dir| root.join(dir))
                .collect(),
        }
    }
}

/// Fetch the interface list and normalize it.
pub(crate) async fn fetch_interfaces<C: Catalog>(
    catalog: &C,
    manifest: &Manifest,
) -> Result<Normalized> {
    let raw = catalog.interfaces().await?;
    let fetched = raw.len();
    let normalized = normalize(raw, &manifest.url_mapper())?;
    info!(
        fetched,
        kept = normalized.interfaces.len(),
        dropped = normalized.dropped.len(),
        "Normalized interfaces."
    );
    Ok(normalized)
}

/// Look for consumer code that the fresh interfaces would break.
pub(crate) fn dependency_verdict(
    manifest: &Manifest,
    layout: &Layout,
    previous: &[ExistingFile],
    fresh: &[Interface],
) -> Result<DependencyVerdict> {
    let verdict = DependencyCheck {
        previous,
        fresh,
        project_id: manifest.project_id(),
        scan_dirs: &layout.scan_dirs,
        output_dir: &layout.output_dir,
        threshold: manifest.rapper.stale_reference_threshold,
    }
    .run()?;
    Ok(verdict)
}

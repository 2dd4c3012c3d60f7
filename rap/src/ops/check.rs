//! Check operation - report what a sync would run into.

use std::path::Path;

use eyre::Result;
use rapper_codegen::drift::changed_files;
use rapper_core::{Version, read_generated, recorded_version};
use rapper_manifest::Manifest;

use super::{Layout, dependency_verdict, fetch_interfaces};
use crate::{catalog::Catalog, reports::CheckReport};

/// Options for the check operation.
pub struct CheckOptions<'a> {
    /// Directory relative manifest paths resolve against.
    pub root: &'a Path,
    /// Skip the catalog, and with it the dependency scan.
    pub offline: bool,
    pub version: Version,
}

/// Execute the check operation.
///
/// Runs the version gate, the manual-edit check and, unless offline, the
/// dependency-break scan. Nothing is written and nothing is asked; a version
/// conflict is reported rather than raised.
pub async fn check<C: Catalog>(
    manifest: &Manifest,
    catalog: &C,
    opts: CheckOptions<'_>,
) -> Result<CheckReport> {
    let layout = Layout::resolve(manifest, opts.root);
    let existing = read_generated(&layout.output_dir)?;

    let dependencies = if opts.offline {
        None
    } else {
        let fresh = fetch_interfaces(catalog, manifest).await?;
        Some(dependency_verdict(manifest, &layout, &existing, &fresh.interfaces)?)
    };

    Ok(CheckReport {
        generated_files: existing.len(),
        running: opts.version,
        recorded: recorded_version(&existing)?,
        changed: changed_files(&existing),
        dependencies,
        output_dir: layout.output_dir,
    })
}

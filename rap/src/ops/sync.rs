//! Sync operation - fetch, check drift, generate and write.

use std::{path::Path, sync::Mutex, time::Instant};

use eyre::Result;
use futures_util::future::try_join_all;
use indexmap::IndexMap;
use rapper_codegen::{
    Normalized,
    drift::{DependencyVerdict, changed_files},
    pipeline::{CompilationContext, Pipeline, Plugin},
};
use rapper_codegen_typescript::TypeScriptCodegen;
use rapper_core::{Header, Version, check_version, read_generated, recorded_version, write_all};
use rapper_ir::{Interface, InterfaceKey};
use rapper_manifest::Manifest;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Layout, dependency_verdict, fetch_interfaces};
use crate::{
    catalog::Catalog,
    prompt::{Confirm, Question},
    reports::{Cancelled, GenerationResult, SyncOutcome, SyncReport},
};

/// Options for the sync operation.
pub struct SyncOptions<'a> {
    /// Directory relative manifest paths resolve against.
    pub root: &'a Path,
    /// Generate and preview without asking or writing.
    pub dry_run: bool,
    /// Version of the running tool, recorded in every file.
    pub version: Version,
}

/// Execute the sync operation.
///
/// Gates run in order and every one of them comes before the first write:
///
/// 1. version gate on the existing files (hard stop, before any fetch)
/// 2. manual-edit confirmation
/// 3. interface and template fetch
/// 4. dependency-break confirmation
///
/// A declined confirmation returns [`SyncOutcome::Cancelled`] and leaves the
/// output directory untouched. Once writing starts each file stands alone.
pub async fn sync<C, P>(
    manifest: &Manifest,
    catalog: &C,
    confirm: &mut P,
    opts: SyncOptions<'_>,
) -> Result<SyncOutcome>
where
    C: Catalog,
    P: Confirm,
{
    let layout = Layout::resolve(manifest, opts.root);
    let existing = read_generated(&layout.output_dir)?;
    check_version(&opts.version, recorded_version(&existing)?.as_ref())?;

    let changed = changed_files(&existing);
    if !changed.is_empty() {
        warn!(count = changed.len(), "Generated files were edited by hand.");
        if !opts.dry_run && !confirm.confirm(&Question::OverwriteEdits(&changed))? {
            return Ok(SyncOutcome::Cancelled(Cancelled::ManualEdits(changed)));
        }
    }

    let Normalized {
        interfaces,
        dropped,
    } = fetch_interfaces(catalog, manifest).await?;
    let templates = fetch_templates(catalog, &interfaces).await?;

    let verdict = dependency_verdict(manifest, &layout, &existing, &interfaces)?;
    let mut unconfirmed_references = 0;
    match &verdict {
        DependencyVerdict::Confirm(findings) if !opts.dry_run => {
            if !confirm.confirm(&Question::BreakDependencies(findings))? {
                return Ok(SyncOutcome::Cancelled(Cancelled::BrokenDependencies(
                    findings.clone(),
                )));
            }
        }
        DependencyVerdict::TooNoisy(findings) => {
            warn!(
                count = findings.len(),
                threshold = manifest.rapper.stale_reference_threshold,
                "Too many stale references to confirm; continuing."
            );
            unconfirmed_references = findings.len();
        }
        _ => {}
    }

    let header = Header::new(
        manifest.rapper.rap_url.as_str(),
        manifest.project_id(),
        opts.version.clone(),
    );
    let ctx = CompilationContext::new(
        manifest.clone(),
        header,
        layout.output_dir.clone(),
        interfaces,
        templates,
    );
    let codegen = TypeScriptCodegen::new();
    let mut ctx = Pipeline::new(&codegen).plugin(PhaseTimer::default()).run(ctx)?;

    let warnings = dropped
        .iter()
        .map(ToString::to_string)
        .chain(ctx.diagnostics.iter().map(|d| d.message.clone()))
        .collect();
    let interface_count = ctx.interfaces.len();
    let files = ctx.take_files();

    let result = if opts.dry_run {
        GenerationResult::Preview(files)
    } else {
        let report = write_all(&files).await;
        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "Wrote generated files."
        );
        GenerationResult::Written(report)
    };

    Ok(SyncOutcome::Synced(SyncReport {
        style: manifest.rapper.style,
        output_dir: layout.output_dir,
        interface_count,
        warnings,
        unconfirmed_references,
        result,
    }))
}

/// Fetch every template concurrently, keyed by `METHOD+url`.
async fn fetch_templates<C: Catalog>(
    catalog: &C,
    interfaces: &[Interface],
) -> Result<IndexMap<InterfaceKey, Value>> {
    let payloads = try_join_all(interfaces.iter().map(|itf| catalog.template(itf.id))).await?;
    debug!(count = payloads.len(), "Fetched templates.");
    Ok(interfaces.iter().map(Interface::key).zip(payloads).collect())
}

/// Logs how long each pipeline phase took.
#[derive(Default)]
struct PhaseTimer {
    started: Mutex<Option<Instant>>,
}

impl Plugin for PhaseTimer {
    fn name(&self) -> &'static str {
        "phase-timer"
    }

    fn on_before_phase(&self, _phase: &str, _ctx: &CompilationContext) -> rapper_core::Result<()> {
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, _ctx: &CompilationContext) -> rapper_core::Result<()> {
        let started = self.started.lock().ok().and_then(|mut s| s.take());
        if let Some(started) = started {
            debug!(phase, elapsed = ?started.elapsed(), "Phase finished.");
        }
        Ok(())
    }
}

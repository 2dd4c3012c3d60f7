//! Sync command report data structures.

use std::path::{Path, PathBuf};

use rapper_codegen::drift::{ChangedFile, DependencyUsageRecord};
use rapper_core::{OutputFile, WriteReport};
use rapper_manifest::Style;

use super::output::{Output, Report};

/// How a sync run ended.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Files were generated (and written, unless previewing).
    Synced(SyncReport),
    /// The operator declined a confirmation; nothing was written.
    Cancelled(Cancelled),
}

/// Which confirmation was declined, with what was shown for it.
#[derive(Debug)]
pub enum Cancelled {
    ManualEdits(Vec<ChangedFile>),
    BrokenDependencies(Vec<DependencyUsageRecord>),
}

/// Report data from a completed sync.
#[derive(Debug)]
pub struct SyncReport {
    pub style: Style,

    pub output_dir: PathBuf,

    /// Interfaces left after normalization.
    pub interface_count: usize,

    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,

    /// Stale references found but too many to confirm one by one.
    pub unconfirmed_references: usize,

    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WriteReport),
    /// Dry-run preview.
    Preview(Vec<OutputFile>),
}

impl SyncReport {
    /// False when some file failed to persist.
    pub fn is_complete(&self) -> bool {
        match &self.result {
            GenerationResult::Written(report) => report.is_complete(),
            GenerationResult::Preview(_) => true,
        }
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.output_dir).unwrap_or(path)
    }
}

impl Report for SyncOutcome {
    fn render(&self, out: &mut dyn Output) {
        match self {
            SyncOutcome::Synced(report) => report.render(out),
            SyncOutcome::Cancelled(cancelled) => cancelled.render(out),
        }
    }
}

impl Report for Cancelled {
    fn render(&self, out: &mut dyn Output) {
        let reason = match self {
            Cancelled::ManualEdits(files) => {
                format!("{} generated file(s) were edited by hand", files.len())
            }
            Cancelled::BrokenDependencies(findings) => {
                format!("{} reference(s) to removed or changed interfaces", findings.len())
            }
        };
        out.preformatted(&format!("Sync cancelled: {}. Nothing was written.", reason));
    }
}

impl Report for SyncReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if self.unconfirmed_references > 0 {
            out.warning(&format!(
                "{} references to removed or changed interfaces were found; too many to list, continuing",
                self.unconfirmed_references
            ));
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl SyncReport {
    fn render_written(&self, out: &mut dyn Output, written: &WriteReport) {
        out.key_value("Style", self.style.as_str());
        out.key_value("Interfaces", &self.interface_count.to_string());
        out.newline();

        out.section(&format!("Generated into {}", self.output_dir.display()));
        for path in &written.written {
            out.added_item(&self.relative(path).display().to_string());
        }

        if !written.failed.is_empty() {
            out.newline();
            out.section("Failed to write");
            for failure in &written.failed {
                out.removed_item(&format!(
                    "{}: {}",
                    self.relative(&failure.path).display(),
                    failure.error
                ));
            }
            out.newline();
            out.warning(&format!(
                "{} of {} files were not written; files already written were kept",
                written.failed.len(),
                written.failed.len() + written.written.len()
            ));
            return;
        }

        out.newline();
        out.preformatted(&format!("✓ Synced {} interfaces", self.interface_count));
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[OutputFile]) {
        for file in files {
            out.divider(&self.relative(file.path()).display().to_string());
            out.preformatted(file.content());
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated for {} interfaces",
            files.len(),
            self.interface_count
        ));
    }
}

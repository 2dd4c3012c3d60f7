//! Check command report data structures.

use std::path::PathBuf;

use rapper_codegen::drift::{ChangedFile, DependencyVerdict};
use rapper_core::{RecordedVersion, Version};

use super::output::{Output, Report};

/// What a sync would run into, gathered without writing.
#[derive(Debug)]
pub struct CheckReport {
    pub output_dir: PathBuf,

    /// Marked files found in the output directory.
    pub generated_files: usize,

    pub running: Version,

    /// Newest tool version recorded in the output directory.
    pub recorded: Option<RecordedVersion>,

    /// Generated files edited by hand.
    pub changed: Vec<ChangedFile>,

    /// `None` when the catalog was not consulted.
    pub dependencies: Option<DependencyVerdict>,
}

impl CheckReport {
    pub fn version_conflict(&self) -> bool {
        self.recorded
            .as_ref()
            .is_some_and(|recorded| self.running < recorded.version)
    }

    /// Whether a sync would go through without stopping or asking.
    pub fn is_clean(&self) -> bool {
        !self.version_conflict()
            && self.changed.is_empty()
            && self
                .dependencies
                .as_ref()
                .is_none_or(|verdict| verdict.findings().is_empty())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value(
            "Output",
            &format!("{} ({} generated files)", self.output_dir.display(), self.generated_files),
        );
        match &self.recorded {
            Some(recorded) => out.key_value(
                "Recorded version",
                &format!("{} ({})", recorded.version, recorded.path.display()),
            ),
            None => out.key_value("Recorded version", "none"),
        }
        out.key_value("Running version", &self.running.to_string());

        if self.version_conflict() {
            out.warning("this rapper is older than the one that generated the files; upgrade before syncing");
        }

        if !self.changed.is_empty() {
            out.newline();
            out.section("Edited by hand");
            for file in &self.changed {
                out.list_item(&file.path.display().to_string());
            }
        }

        out.newline();
        self.render_dependencies(out);

        out.newline();
        if self.is_clean() {
            out.preformatted("✓ Ready to sync");
        } else {
            out.preformatted("✗ A sync would stop or ask for confirmation");
        }
    }
}

impl CheckReport {
    fn render_dependencies(&self, out: &mut dyn Output) {
        let verdict = match &self.dependencies {
            None => return out.key_value("Dependency scan", "skipped (offline)"),
            Some(DependencyVerdict::NotApplicable) => {
                return out.key_value("Dependency scan", "skipped (no previous run of this project)");
            }
            Some(DependencyVerdict::Clean) => {
                return out.key_value("Dependency scan", "no stale references");
            }
            Some(verdict) => verdict,
        };

        out.section("Stale references");
        for finding in verdict.findings() {
            out.list_item(&format!(
                "{} ({}) at {}:{}:{}",
                finding.interface_key,
                finding.reason,
                finding.file_path.display(),
                finding.line,
                finding.column
            ));
        }
        if let DependencyVerdict::TooNoisy(findings) = verdict {
            out.warning(&format!(
                "{} references reach the threshold; sync will continue without asking",
                findings.len()
            ));
        }
    }
}

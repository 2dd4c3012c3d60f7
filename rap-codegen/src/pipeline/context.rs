//! Context passed through pipeline phases.

use std::path::PathBuf;

use indexmap::IndexMap;
use rapper_core::{Header, OutputFile};
use rapper_ir::{Interface, InterfaceKey};
use rapper_manifest::Manifest;
use serde_json::Value;

use super::diagnostic::Diagnostic;
use crate::{
    convert::ModelTable,
    generator::Extras,
    merge::{GeneratorOutput, MergedFile},
};

/// State carried through every phase of one run.
///
/// Inputs are set at construction and never mutated; each phase fills in its
/// own result slot.
#[derive(Debug)]
pub struct CompilationContext {
    pub manifest: Manifest,
    pub header: Header,
    /// Directory the emitted files are placed in.
    pub output_dir: PathBuf,
    /// Normalized interfaces.
    pub interfaces: Vec<Interface>,
    /// Template payloads keyed by `METHOD+url`.
    pub templates: IndexMap<InterfaceKey, Value>,
    /// Set by the convert phase.
    pub models: Option<ModelTable>,
    /// Set by the generate phase.
    pub outputs: Option<Vec<GeneratorOutput>>,
    /// Set by the merge phase.
    pub merged: Option<Vec<MergedFile>>,
    /// Set by the emit phase.
    pub files: Option<Vec<OutputFile>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(
        manifest: Manifest,
        header: Header,
        output_dir: impl Into<PathBuf>,
        interfaces: Vec<Interface>,
        templates: IndexMap<InterfaceKey, Value>,
    ) -> Self {
        Self {
            manifest,
            header,
            output_dir: output_dir.into(),
            interfaces,
            templates,
            models: None,
            outputs: None,
            merged: None,
            files: None,
            diagnostics: Vec::new(),
        }
    }

    /// Shared generator extras derived from the manifest.
    pub fn extras(&self) -> Extras {
        Extras {
            rap_url: self.manifest.rapper.rap_url.clone(),
            res_selector: self.manifest.rapper.res_selector.clone(),
        }
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Emitted files; empty until the emit phase has run.
    pub fn files(&self) -> &[OutputFile] {
        self.files.as_deref().unwrap_or_default()
    }

    /// Take the emitted files out of the context.
    pub fn take_files(&mut self) -> Vec<OutputFile> {
        self.files.take().unwrap_or_default()
    }
}

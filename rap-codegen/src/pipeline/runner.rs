//! Pipeline orchestrator.

use rapper_core::Result;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{ConvertPhase, EmitPhase, GeneratePhase, MergePhase},
};
use crate::language::LanguageCodegen;

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (convert, generate, merge, emit) for the target
/// language, calling plugin hooks before and after each phase.
///
/// ```ignore
/// let codegen = TypeScriptCodegen::new();
/// let pipeline = Pipeline::new(&codegen).plugin(PhaseTimer::default());
/// let ctx = pipeline.run(ctx)?;
/// write_all(ctx.files()).await;
/// ```
pub struct Pipeline<'a> {
    codegen: &'a dyn LanguageCodegen,
    plugins: Vec<Box<dyn Plugin + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(codegen: &'a dyn LanguageCodegen) -> Self {
        Self {
            codegen,
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'a) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a phase or plugin; later phases do
    /// not run and no files are emitted.
    pub fn run(&self, mut ctx: CompilationContext) -> Result<CompilationContext> {
        let generators = self.codegen.generators(ctx.manifest.rapper.style);
        debug!(
            language = self.codegen.language(),
            style = %ctx.manifest.rapper.style,
            generators = generators.len(),
            "Running generation pipeline."
        );

        let phases: [&dyn Phase; 4] = [
            &ConvertPhase::new(self.codegen.converter()),
            &GeneratePhase::new(&generators),
            &MergePhase,
            &EmitPhase::new(self.codegen),
        ];

        for phase in phases {
            self.run_phase(phase, &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

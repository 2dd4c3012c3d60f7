//! Pipeline phase trait.

use rapper_core::Result;

use super::CompilationContext;

/// A phase in the generation pipeline.
///
/// Phases run in order; each reads what earlier phases left in the context
/// and adds its own results.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in plugin hooks and logs).
    fn name(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Any error aborts the run. Non-fatal issues are recorded as diagnostics.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}

//! Generate phase: run every generator over the converted models.

use rapper_core::{Error, Result};
use tracing::debug;

use crate::{
    generator::{GenerationInput, Generator},
    merge::GeneratorOutput,
    pipeline::{CompilationContext, Phase},
};

pub struct GeneratePhase<'a> {
    generators: &'a [Box<dyn Generator>],
}

impl<'a> GeneratePhase<'a> {
    pub fn new(generators: &'a [Box<dyn Generator>]) -> Self {
        Self { generators }
    }
}

impl Phase for GeneratePhase<'_> {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let models = ctx
            .models
            .as_ref()
            .ok_or_else(|| Error::generation("models are missing; the convert phase did not run"))?;
        let extras = ctx.extras();
        let input = GenerationInput {
            interfaces: &ctx.interfaces,
            models,
            templates: &ctx.templates,
            extras: &extras,
            format: &ctx.manifest.format,
        };

        let outputs = self
            .generators
            .iter()
            .map(|generator| {
                let fragments = generator.generate(&input)?;
                debug!(
                    generator = generator.name(),
                    fragments = fragments.len(),
                    "Generator finished."
                );
                Ok(GeneratorOutput {
                    generator: generator.name(),
                    kind: generator.kind(),
                    fragments,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if ctx.interfaces.is_empty() {
            ctx.add_warning("generate", "the catalog returned no interfaces");
        }
        ctx.outputs = Some(outputs);
        Ok(())
    }
}

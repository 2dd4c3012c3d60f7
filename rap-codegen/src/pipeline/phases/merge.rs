//! Merge phase: combine fragments into one text per file.

use rapper_core::Result;

use crate::{
    merge::merge,
    pipeline::{CompilationContext, Phase},
};

pub struct MergePhase;

impl Phase for MergePhase {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let outputs = ctx.outputs.take().unwrap_or_default();
        ctx.merged = Some(merge(outputs)?);
        Ok(())
    }
}

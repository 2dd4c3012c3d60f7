//! Convert phase: schema → type text for every interface.

use rapper_core::Result;

use crate::{
    convert::{TypeConverter, convert_all},
    pipeline::{CompilationContext, Phase},
};

pub struct ConvertPhase<'a> {
    converter: &'a dyn TypeConverter,
}

impl<'a> ConvertPhase<'a> {
    pub fn new(converter: &'a dyn TypeConverter) -> Self {
        Self { converter }
    }
}

impl Phase for ConvertPhase<'_> {
    fn name(&self) -> &'static str {
        "convert"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let models = convert_all(&ctx.interfaces, self.converter, &ctx.manifest.rapper.rap_url)?;
        ctx.models = Some(models);
        Ok(())
    }
}

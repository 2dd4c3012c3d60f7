//! Emit phase: header, formatting pass and content marker per file.

use rapper_core::{OutputFile, Result};

use crate::{
    language::LanguageCodegen,
    pipeline::{CompilationContext, Phase},
};

pub struct EmitPhase<'a> {
    codegen: &'a dyn LanguageCodegen,
}

impl<'a> EmitPhase<'a> {
    pub fn new(codegen: &'a dyn LanguageCodegen) -> Self {
        Self { codegen }
    }
}

impl Phase for EmitPhase<'_> {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let header = ctx.header.render();
        let files = ctx
            .merged
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|merged| {
                let text = format!("{}\n{}", header, merged.text);
                let body = self.codegen.format(&text, &ctx.manifest.format);
                let path = ctx.output_dir.join(format!(
                    "{}.{}",
                    merged.kind.stem(),
                    self.codegen.file_extension()
                ));
                OutputFile::new(path, &body)
            })
            .collect();
        ctx.files = Some(files);
        Ok(())
    }
}

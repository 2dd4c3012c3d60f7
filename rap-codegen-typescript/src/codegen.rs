//! The TypeScript target.

use rapper_codegen::{Generator, LanguageCodegen, TypeConverter};
use rapper_manifest::{FormatOptions, Style};

use crate::{
    converter::TsTypeConverter,
    format,
    generators::{BaseGenerator, ReduxGenerator},
};

/// Generates `.ts` files for the `rap` runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptCodegen {
    converter: TsTypeConverter,
}

impl TypeScriptCodegen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageCodegen for TypeScriptCodegen {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn converter(&self) -> &dyn TypeConverter {
        &self.converter
    }

    fn generators(&self, style: Style) -> Vec<Box<dyn Generator>> {
        match style {
            Style::Normal => vec![Box::new(BaseGenerator)],
            Style::Redux => vec![Box::new(BaseGenerator), Box::new(ReduxGenerator)],
        }
    }

    fn format(&self, text: &str, options: &FormatOptions) -> String {
        format::format(text, options)
    }
}

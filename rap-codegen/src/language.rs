//! Target-language abstraction.

use rapper_manifest::{FormatOptions, Style};

use crate::{convert::TypeConverter, generator::Generator};

/// Everything the pipeline needs from a target language.
///
/// Implement this trait to generate client code in another language.
pub trait LanguageCodegen: Send + Sync {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated files (e.g., "ts")
    fn file_extension(&self) -> &'static str;

    /// Schema to type text conversion.
    fn converter(&self) -> &dyn TypeConverter;

    /// Generators for `style`, Base first.
    fn generators(&self, style: Style) -> Vec<Box<dyn Generator>>;

    /// Deterministic formatting pass over a merged file.
    fn format(&self, text: &str, options: &FormatOptions) -> String;
}

//! Generator contract: what generators receive and what they contribute.

use std::fmt;

use indexmap::IndexMap;
use rapper_core::Result;
use rapper_ir::{Interface, InterfaceKey};
use rapper_manifest::FormatOptions;
use serde_json::Value;

use crate::convert::ModelTable;

/// A logical output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    Index,
    Request,
    Template,
    /// A file owned by an integration style, named after it (e.g. `redux`).
    Style(String),
}

impl FileKind {
    /// File name without extension.
    pub fn stem(&self) -> &str {
        match self {
            FileKind::Index => "index",
            FileKind::Request => "request",
            FileKind::Template => "template",
            FileKind::Style(name) => name,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// One generator's self-contained contribution to one output file.
///
/// The merger never parses the sections; `symbols` lists the top-level names
/// the fragment defines so collisions between generators can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub imports: String,
    pub body: String,
    pub exports: String,
    pub symbols: Vec<String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn imports(mut self, text: impl Into<String>) -> Self {
        self.imports = text.into();
        self
    }

    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = text.into();
        self
    }

    pub fn exports(mut self, text: impl Into<String>) -> Self {
        self.exports = text.into();
        self
    }

    /// Declare the top-level names this fragment defines.
    pub fn defines(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }
}

/// The Base generator always runs first; an Extension adds to its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GeneratorKind {
    Base,
    Extension,
}

/// Values shared by every generator besides the interfaces themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extras {
    /// Public catalog address, for editor links.
    pub rap_url: String,
    /// Response selector type alias, emitted verbatim.
    pub res_selector: String,
}

/// Everything a generator may read. Generators never perform I/O.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub interfaces: &'a [Interface],
    pub models: &'a ModelTable,
    pub templates: &'a IndexMap<InterfaceKey, Value>,
    pub extras: &'a Extras,
    pub format: &'a FormatOptions,
}

/// A code generator producing fragments for one or more files.
pub trait Generator: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> GeneratorKind;

    /// Produce fragments. An error aborts generation for the whole run.
    fn generate(&self, input: &GenerationInput<'_>) -> Result<Vec<(FileKind, Fragment)>>;
}

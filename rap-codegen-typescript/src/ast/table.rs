//! Ordered `'key': value` tables.
//!
//! Every per-model lookup in the generated code (model types, fetchers,
//! hooks, selectors) is one of these, keyed by model name.

use indexmap::IndexMap;
use rapper_codegen::{CodeBuilder, CodeFragment, Renderable};

use super::string_literal;

#[derive(Debug, Clone)]
struct Entry {
    doc: Vec<String>,
    value: String,
}

/// An ordered mapping rendered either as an object literal or as the
/// member list of an interface.
#[derive(Debug, Clone)]
pub struct KeyedTable {
    header: String,
    close: &'static str,
    separator: &'static str,
    entries: IndexMap<String, Entry>,
}

impl KeyedTable {
    /// An object literal: `header` must end with `{`; entries end in `,`.
    pub fn object(header: impl Into<String>) -> Self {
        Self::with(header.into(), "};", ",")
    }

    /// An interface or type literal body; entries end in `;`.
    pub fn members(header: impl Into<String>) -> Self {
        Self::with(header.into(), "}", ";")
    }

    fn with(header: String, close: &'static str, separator: &'static str) -> Self {
        Self {
            header,
            close,
            separator,
            entries: IndexMap::new(),
        }
    }

    /// Add an entry. `value` may span several lines.
    pub fn entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.documented(key, Vec::new(), value)
    }

    /// Add an entry preceded by a doc comment.
    pub fn documented(
        mut self,
        key: impl Into<String>,
        doc: Vec<String>,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into().trim_end().to_string();
        self.entries.insert(key.into(), Entry { doc, value });
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for KeyedTable {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.entries.is_empty() {
            return vec![CodeFragment::Line(format!("{}{}", self.header, self.close))];
        }

        let mut body = Vec::new();
        for (i, (key, entry)) in self.entries.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            if !entry.doc.is_empty() {
                body.push(CodeFragment::Doc(entry.doc.clone()));
            }
            let text = format!("{}: {}{}", string_literal(key), entry.value, self.separator);
            body.push(CodeFragment::text(&text));
        }

        vec![CodeFragment::block(
            self.header.clone(),
            body,
            Some(self.close.to_string()),
        )]
    }
}

//! Schema to TypeScript type text.
//!
//! JSON Schema sources are rendered structurally; sample payloads have
//! their types inferred. Property order follows the input, so the same
//! source always yields the same text.

mod sample;
mod schema;

use rapper_codegen::{CodeBuilder, ConversionError, TypeConverter};
use rapper_ir::SchemaSource;

use crate::ast::property_key;

/// TypeScript [`TypeConverter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TsTypeConverter;

impl TsTypeConverter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeConverter for TsTypeConverter {
    fn convert(&self, source: &SchemaSource) -> Result<String, ConversionError> {
        match source {
            SchemaSource::Schema(value) => schema::render(value),
            SchemaSource::Sample(value) => Ok(sample::infer(value)),
        }
    }
}

/// One property of an object type.
struct Member {
    key: String,
    optional: bool,
    ty: String,
    doc: Option<String>,
}

/// Render an object type literal, one member per line.
fn object_literal(members: &[Member]) -> String {
    if members.is_empty() {
        return "{}".to_string();
    }

    let mut builder = CodeBuilder::typescript();
    builder.push_line("{").push_indent();
    for member in members {
        if let Some(doc) = &member.doc {
            let lines: Vec<String> = doc.lines().map(|l| l.replace("*/", "* /")).collect();
            builder.push_doc(&lines);
        }
        let optional = if member.optional { "?" } else { "" };
        builder.push_text(&format!(
            "{}{}: {};",
            property_key(&member.key),
            optional,
            member.ty
        ));
    }
    builder.push_dedent().push_line("}");
    builder.build().trim_end().to_string()
}

/// Join alternatives, dropping repeats while keeping first-seen order.
fn union(types: Vec<String>, separator: &str) -> String {
    let mut seen: Vec<String> = Vec::with_capacity(types.len());
    for ty in types {
        if !seen.contains(&ty) {
            seen.push(ty);
        }
    }
    seen.join(separator)
}

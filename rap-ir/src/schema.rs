//! Schema inputs for the type converter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an interface's request or response type comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SchemaSource {
    /// A JSON-Schema-like document.
    Schema(Value),
    /// A representative payload; types are inferred from its values.
    Sample(Value),
}

impl SchemaSource {
    /// An object schema with no properties.
    pub fn empty_object() -> Self {
        Self::Schema(serde_json::json!({ "type": "object", "properties": {} }))
    }

    pub fn value(&self) -> &Value {
        match self {
            Self::Schema(v) | Self::Sample(v) => v,
        }
    }
}

impl Default for SchemaSource {
    fn default() -> Self {
        Self::empty_object()
    }
}

//! Type inference from representative payloads.

use serde_json::Value;

use super::{Member, object_literal, union};

/// Infer a type from `value`. Every object key is treated as required.
pub(super) fn infer(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) if items.is_empty() => "Array<any>".to_string(),
        Value::Array(items) => format!("Array<{}>", union(items.iter().map(infer).collect(), " | ")),
        Value::Object(map) => {
            let members: Vec<Member> = map
                .iter()
                .map(|(key, value)| Member {
                    key: mock_key(key).to_string(),
                    optional: false,
                    ty: infer(value),
                    doc: None,
                })
                .collect();
            object_literal(&members)
        }
    }
}

/// Strip a mock generation rule (`list|1-10`) from a key.
fn mock_key(key: &str) -> &str {
    key.split('|').next().unwrap_or(key)
}

//! Shape fingerprints recorded in generated doc comments.
//!
//! Each model's doc comment carries three tag lines:
//!
//! ```text
//!  * @model GET/users
//!  * @key GET/users
//!  * @fingerprint 3f2a...
//! ```
//!
//! The next run reads them back to tell which interfaces were removed or
//! changed shape since the files were generated.

use indexmap::IndexMap;
use rapper_core::content_hash;
use rapper_ir::{Interface, InterfaceKey};
use serde_json::{Map, Value};

const MODEL_TAG: &str = "@model ";
const KEY_TAG: &str = "@key ";
const FINGERPRINT_TAG: &str = "@fingerprint ";

/// Hash of an interface's request and response schemas.
///
/// Schemas are hashed in canonical form, so the same shape served with its
/// properties in another order keeps its fingerprint.
pub fn fingerprint(itf: &Interface) -> String {
    let request = canonical(itf.request.value()).to_string();
    let response = canonical(itf.response.value()).to_string();
    content_hash(&format!("{}\n{}", request, response))
}

/// Object keys sorted at every depth; `required` lists sorted as sets.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::Array(names) if key == "required" => required_set(names),
                        other => canonical(other),
                    };
                    (key.clone(), value)
                })
                .collect::<Map<_, _>>()
                .into()
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

fn required_set(names: &[Value]) -> Value {
    let mut names: Vec<Value> = names.iter().map(canonical).collect();
    names.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    Value::Array(names)
}

/// Doc-comment tag lines for `itf`, without the leading ` * `.
pub fn tags(itf: &Interface) -> [String; 3] {
    [
        format!("{}{}", MODEL_TAG, itf.model_name),
        format!("{}{}", KEY_TAG, itf.key()),
        format!("{}{}", FINGERPRINT_TAG, fingerprint(itf)),
    ]
}

/// A model as recorded by a previous run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    pub model_name: String,
    pub key: InterfaceKey,
    pub fingerprint: String,
}

/// Read the tagged model records from a generated body.
///
/// A model documented more than once is reported once. Incomplete tag groups
/// are ignored.
pub fn parse_records(body: &str) -> Vec<ModelRecord> {
    let mut records: IndexMap<String, ModelRecord> = IndexMap::new();
    let mut model: Option<&str> = None;
    let mut key: Option<&str> = None;

    for line in body.lines() {
        let line = line.trim_start().trim_start_matches('*').trim();
        if let Some(value) = line.strip_prefix(MODEL_TAG) {
            model = Some(value.trim());
            key = None;
        } else if let Some(value) = line.strip_prefix(KEY_TAG) {
            key = Some(value.trim());
        } else if let Some(value) = line.strip_prefix(FINGERPRINT_TAG) {
            if let (Some(m), Some(k)) = (model.take(), key.take()) {
                records.entry(m.to_string()).or_insert_with(|| ModelRecord {
                    model_name: m.to_string(),
                    key: InterfaceKey::from(k),
                    fingerprint: value.trim().to_string(),
                });
            }
        }
    }

    records.into_values().collect()
}

#[cfg(test)]
mod tests {
    use rapper_ir::{Method, RawInterface, SchemaSource};
    use serde_json::json;

    use super::*;

    fn itf(response: serde_json::Value) -> Interface {
        let raw = RawInterface {
            id: 1,
            repository_id: 1,
            module_id: 1,
            name: "users".into(),
            description: String::new(),
            url: "/users".into(),
            method: Method::new("GET"),
            request: SchemaSource::default(),
            response: SchemaSource::Schema(response),
        };
        Interface::from_raw(raw, "/users".into(), "GET/users".into())
    }

    #[test]
    fn test_fingerprint_tracks_shape() {
        let a = itf(json!({ "type": "string" }));
        let b = itf(json!({ "type": "number" }));
        assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_ignores_property_order() {
        let a = itf(json!({
            "type": "object",
            "properties": {
                "id": { "type": "number" },
                "name": { "type": "string", "description": "display name" }
            },
            "required": ["id", "name"]
        }));
        let b = itf(json!({
            "required": ["name", "id"],
            "properties": {
                "name": { "description": "display name", "type": "string" },
                "id": { "type": "number" }
            },
            "type": "object"
        }));
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_keeps_array_order_elsewhere() {
        let a = itf(json!({ "enum": ["a", "b"] }));
        let b = itf(json!({ "enum": ["b", "a"] }));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_tags_roundtrip() {
        let a = itf(json!({ "type": "string" }));
        let doc: String = tags(&a)
            .iter()
            .map(|t| format!("   * {}\n", t))
            .collect();
        let body = format!("/**\n * Interface: users\n{doc} */\n/**\n{doc} */\n");

        let records = parse_records(&body);
        assert_eq!(
            records,
            vec![ModelRecord {
                model_name: "GET/users".into(),
                key: InterfaceKey::from("GET/users"),
                fingerprint: fingerprint(&a),
            }]
        );
    }

    #[test]
    fn test_incomplete_groups_are_ignored() {
        let body = " * @model GET/a\n * @fingerprint abc\n * @key GET/b\n";
        assert!(parse_records(body).is_empty());
    }
}

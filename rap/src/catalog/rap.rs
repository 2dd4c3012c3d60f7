//! Rap repository documents.
//!
//! Rap describes request and response bodies as a flat property list linked
//! by `parentId`. [`Repository::into_interfaces`] folds each list back into a
//! JSON Schema object so the type converter never sees the Rap format.

use std::collections::HashMap;

use rapper_ir::{Method, RawInterface, SchemaSource};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// `parentId` of top-level properties.
const ROOT: i64 = -1;

/// Envelope around every Rap API answer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl<T> Envelope<T> {
    /// The payload, or the server's error message.
    pub fn into_data(self) -> Result<T, String> {
        match (self.data, self.err_msg) {
            (Some(data), _) => Ok(data),
            (None, Some(message)) => Err(message),
            (None, None) => Err("response has no data".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub id: u64,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Deserialize)]
pub struct Module {
    pub id: u64,
    #[serde(default)]
    pub interfaces: Vec<RapInterface>,
}

#[derive(Debug, Deserialize)]
pub struct RapInterface {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Request,
    Response,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub scope: Scope,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "root_parent")]
    pub parent_id: i64,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

fn root_parent() -> i64 {
    ROOT
}

impl Repository {
    /// Flatten modules into raw interfaces, in catalog order.
    pub fn into_interfaces(self) -> Vec<RawInterface> {
        let repository_id = self.id;
        self.modules
            .into_iter()
            .flat_map(|module| {
                let module_id = module.id;
                module
                    .interfaces
                    .into_iter()
                    .map(move |itf| itf.into_raw(repository_id, module_id))
            })
            .collect()
    }
}

impl RapInterface {
    fn into_raw(self, repository_id: u64, module_id: u64) -> RawInterface {
        let request = Folder::new(&self.properties, Scope::Request).root();
        let response = Folder::new(&self.properties, Scope::Response).root();
        RawInterface {
            id: self.id,
            repository_id,
            module_id,
            name: self.name,
            description: self.description,
            url: self.url,
            method: Method::new(&self.method),
            request: SchemaSource::Schema(request),
            response: SchemaSource::Schema(response),
        }
    }
}

/// Rebuilds the property tree of one scope.
struct Folder<'a> {
    children: HashMap<i64, Vec<&'a Property>>,
    /// Ids of the properties currently being folded.
    path: Vec<i64>,
}

impl<'a> Folder<'a> {
    fn new(properties: &'a [Property], scope: Scope) -> Self {
        let mut children: HashMap<i64, Vec<&Property>> = HashMap::new();
        for property in properties.iter().filter(|p| p.scope == scope) {
            children.entry(property.parent_id).or_default().push(property);
        }
        Self {
            children,
            path: Vec::new(),
        }
    }

    fn root(mut self) -> Value {
        self.object(ROOT)
    }

    fn object(&mut self, parent: i64) -> Value {
        let members = self.children.get(&parent).cloned().unwrap_or_default();
        let mut properties = Map::new();
        let mut required = Vec::new();

        for property in members {
            let name = property_name(&property.name);
            if name.is_empty() {
                continue;
            }
            if property.required {
                required.push(Value::String(name.to_string()));
            }
            properties.insert(name.to_string(), self.property(property));
        }

        let mut schema = json!({ "type": "object", "properties": properties });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    fn property(&mut self, property: &Property) -> Value {
        // Duplicate ids can make a property its own ancestor.
        if self.path.contains(&property.id) {
            return json!({});
        }
        self.path.push(property.id);

        let mut schema = match property.kind.as_str() {
            "String" => json!({ "type": "string" }),
            "Number" => json!({ "type": "number" }),
            "Boolean" => json!({ "type": "boolean" }),
            "Null" => json!({ "type": "null" }),
            "Object" => self.object(property.id),
            "Array" if self.children.contains_key(&property.id) => {
                json!({ "type": "array", "items": self.object(property.id) })
            }
            "Array" => json!({ "type": "array" }),
            // Function, RegExp and anything newer Rap adds
            _ => json!({}),
        };

        self.path.pop();

        let description = property.description.trim();
        if let (false, Some(object)) = (description.is_empty(), schema.as_object_mut()) {
            object.insert("description".into(), Value::String(description.to_string()));
        }
        schema
    }
}

/// Property names may carry a mock rule, as in `list|1-10`.
fn property_name(raw: &str) -> &str {
    raw.split('|').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(properties: Value) -> Repository {
        serde_json::from_value(json!({
            "id": 3,
            "modules": [{
                "id": 7,
                "interfaces": [{
                    "id": 11,
                    "name": "users",
                    "url": "/users",
                    "method": "GET",
                    "properties": properties
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_folds_property_tree() {
        let repo = repository(json!([
            { "id": 1, "scope": "request", "name": "page", "type": "Number", "parentId": -1, "required": true },
            { "id": 2, "scope": "response", "name": "list|1-10", "type": "Array", "parentId": -1 },
            { "id": 3, "scope": "response", "name": "name", "type": "String", "parentId": 2, "required": true, "description": "Display name" },
            { "id": 4, "scope": "response", "name": "meta", "type": "Object", "parentId": -1 },
            { "id": 5, "scope": "response", "name": "done", "type": "Boolean", "parentId": 4 },
            { "id": 6, "scope": "response", "name": "cb", "type": "Function", "parentId": -1 }
        ]));

        let interfaces = repo.into_interfaces();
        assert_eq!(interfaces.len(), 1);
        let itf = &interfaces[0];
        assert_eq!((itf.repository_id, itf.module_id, itf.id), (3, 7, 11));
        assert_eq!(
            itf.request.value(),
            &json!({
                "type": "object",
                "properties": { "page": { "type": "number" } },
                "required": ["page"]
            })
        );
        assert_eq!(
            itf.response.value(),
            &json!({
                "type": "object",
                "properties": {
                    "list": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string", "description": "Display name" }
                            },
                            "required": ["name"]
                        }
                    },
                    "meta": {
                        "type": "object",
                        "properties": { "done": { "type": "boolean" } }
                    },
                    "cb": {}
                }
            })
        );
    }

    #[test]
    fn test_duplicate_ids_do_not_recurse() {
        let repo = repository(json!([
            { "id": 1, "scope": "response", "name": "outer", "type": "Object", "parentId": -1 },
            { "id": 1, "scope": "response", "name": "inner", "type": "Object", "parentId": 1 }
        ]));
        let itf = &repo.into_interfaces()[0];
        assert_eq!(
            itf.response.value()["properties"]["outer"],
            json!({ "type": "object", "properties": { "inner": {} } })
        );
    }

    #[test]
    fn test_envelope_error_message() {
        let envelope: Envelope<Repository> =
            serde_json::from_value(json!({ "isOk": false, "errMsg": "no access" })).unwrap();
        assert_eq!(envelope.into_data().unwrap_err(), "no access");
    }

    #[test]
    fn test_property_name_strips_mock_rule() {
        assert_eq!(property_name("list|1-10"), "list");
        assert_eq!(property_name(" id "), "id");
        assert_eq!(property_name("|1"), "");
    }
}

//! JSON Schema rendering.

use rapper_codegen::ConversionError;
use serde_json::{Map, Value};

use super::{Member, object_literal, union};
use crate::ast::string_literal;

const DEFINITION_PREFIXES: [(&str, &str); 2] = [("#/definitions/", "definitions"), ("#/$defs/", "$defs")];

pub(super) fn render(root: &Value) -> Result<String, ConversionError> {
    if !root.is_object() {
        return Err(ConversionError::new(format!(
            "expected a schema object, found {}",
            kind(root)
        )));
    }
    Renderer {
        root,
        resolving: Vec::new(),
    }
    .render(root)
}

struct Renderer<'a> {
    root: &'a Value,
    /// `$ref`s currently being expanded, outermost first.
    resolving: Vec<&'a str>,
}

impl<'a> Renderer<'a> {
    fn render(&mut self, schema: &'a Value) -> Result<String, ConversionError> {
        let obj = match schema {
            Value::Object(obj) => obj,
            Value::Bool(true) => return Ok("any".to_string()),
            Value::Bool(false) => return Ok("never".to_string()),
            other => {
                return Err(ConversionError::new(format!(
                    "expected a schema object, found {}",
                    kind(other)
                )));
            }
        };

        if let Some(reference) = obj.get("$ref") {
            return self.reference(reference);
        }
        if let Some(values) = obj.get("enum") {
            return enumeration(values);
        }
        if let Some(value) = obj.get("const") {
            return literal(value);
        }
        for (keyword, separator) in [("oneOf", " | "), ("anyOf", " | "), ("allOf", " & ")] {
            if let Some(members) = obj.get(keyword) {
                return self.combine(keyword, members, separator);
            }
        }

        match obj.get("type") {
            None if obj.contains_key("properties") => self.object(obj),
            None if obj.contains_key("items") => self.array(obj),
            None => Ok("any".to_string()),
            Some(Value::String(ty)) => self.typed(ty, obj),
            Some(Value::Array(types)) => {
                let rendered = types
                    .iter()
                    .map(|ty| match ty {
                        Value::String(ty) => self.typed(ty, obj),
                        other => Err(ConversionError::new(format!(
                            "'type' entries must be strings, found {}",
                            kind(other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if rendered.is_empty() {
                    return Err(ConversionError::new("'type' must not be an empty list"));
                }
                Ok(union(rendered, " | "))
            }
            Some(other) => Err(ConversionError::new(format!(
                "'type' must be a string, found {}",
                kind(other)
            ))),
        }
    }

    fn typed(&mut self, ty: &str, obj: &'a Map<String, Value>) -> Result<String, ConversionError> {
        match ty {
            "string" => Ok("string".to_string()),
            "number" | "integer" => Ok("number".to_string()),
            "boolean" => Ok("boolean".to_string()),
            "null" => Ok("null".to_string()),
            "array" => self.array(obj),
            "object" => self.object(obj),
            other => Err(ConversionError::new(format!("unknown type '{}'", other))),
        }
    }

    fn object(&mut self, obj: &'a Map<String, Value>) -> Result<String, ConversionError> {
        let properties = match obj.get("properties") {
            None => None,
            Some(Value::Object(properties)) => Some(properties),
            Some(other) => {
                return Err(ConversionError::new(format!(
                    "'properties' must be an object, found {}",
                    kind(other)
                )));
            }
        };
        let required: Vec<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut members = Vec::new();
        for (name, property) in properties.into_iter().flatten() {
            members.push(Member {
                key: name.clone(),
                optional: !required.contains(&name.as_str()),
                ty: self.render(property)?,
                doc: property
                    .get("description")
                    .and_then(Value::as_str)
                    .filter(|d| !d.trim().is_empty())
                    .map(str::to_string),
            });
        }

        if members.is_empty() {
            if let Some(additional) = obj.get("additionalProperties").filter(|v| v.is_object()) {
                return Ok(format!("{{ [key: string]: {} }}", self.render(additional)?));
            }
        }
        Ok(object_literal(&members))
    }

    fn array(&mut self, obj: &'a Map<String, Value>) -> Result<String, ConversionError> {
        match obj.get("items") {
            None => Ok("Array<any>".to_string()),
            Some(Value::Array(tuple)) => {
                let items = tuple
                    .iter()
                    .map(|item| self.render(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", items.join(", ")))
            }
            Some(items) => Ok(format!("Array<{}>", self.render(items)?)),
        }
    }

    fn combine(
        &mut self,
        keyword: &str,
        members: &'a Value,
        separator: &str,
    ) -> Result<String, ConversionError> {
        let members = match members {
            Value::Array(members) if !members.is_empty() => members,
            _ => {
                return Err(ConversionError::new(format!(
                    "'{}' must be a non-empty list",
                    keyword
                )));
            }
        };
        let rendered = members
            .iter()
            .map(|member| self.render(member))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union(rendered, separator))
    }

    fn reference(&mut self, reference: &'a Value) -> Result<String, ConversionError> {
        let Some(reference) = reference.as_str() else {
            return Err(ConversionError::new("'$ref' must be a string"));
        };
        if self.resolving.contains(&reference) {
            return Err(ConversionError::new(format!("circular $ref '{}'", reference)));
        }

        let target = if reference == "#" {
            Some(self.root)
        } else {
            DEFINITION_PREFIXES.iter().find_map(|(prefix, section)| {
                let name = reference.strip_prefix(prefix)?;
                self.root.get(section)?.get(name)
            })
        };
        let Some(target) = target else {
            return Err(ConversionError::new(format!("unresolved $ref '{}'", reference)));
        };

        self.resolving.push(reference);
        let rendered = self.render(target);
        self.resolving.pop();
        rendered
    }
}

fn enumeration(values: &Value) -> Result<String, ConversionError> {
    match values {
        Value::Array(values) if !values.is_empty() => {
            let literals = values.iter().map(literal).collect::<Result<Vec<_>, _>>()?;
            Ok(union(literals, " | "))
        }
        _ => Err(ConversionError::new("'enum' must be a non-empty list")),
    }
}

fn literal(value: &Value) -> Result<String, ConversionError> {
    match value {
        Value::String(s) => Ok(string_literal(s)),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(ConversionError::new(format!(
            "enum values must be literals, found {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

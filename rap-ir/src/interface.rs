//! Catalog interface definitions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SchemaSource;

/// An HTTP method, always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Method(String);

impl Method {
    pub fn new(method: impl AsRef<str>) -> Self {
        Self(method.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Textual key of an interface: `METHOD` immediately followed by its URL
/// (e.g. `GET/users`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceKey(String);

impl InterfaceKey {
    pub fn new(method: &Method, url: &str) -> Self {
        Self(format!("{}{}", method, url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterfaceKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An interface exactly as the catalog returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterface {
    pub id: u64,
    #[serde(default)]
    pub repository_id: u64,
    #[serde(default)]
    pub module_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    pub method: Method,
    #[serde(default)]
    pub request: SchemaSource,
    #[serde(default)]
    pub response: SchemaSource,
}

/// A normalized interface with its assigned model name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub id: u64,
    pub repository_id: u64,
    pub module_id: u64,
    pub name: String,
    pub description: String,
    /// Canonical URL path, always starting with `/`.
    pub url: String,
    pub method: Method,
    /// `METHOD` + mapped URL; unique in a normalized set.
    pub model_name: String,
    pub request: SchemaSource,
    pub response: SchemaSource,
}

impl Interface {
    /// Build a normalized interface from its raw form.
    pub fn from_raw(raw: RawInterface, url: String, model_name: String) -> Self {
        Self {
            id: raw.id,
            repository_id: raw.repository_id,
            module_id: raw.module_id,
            name: raw.name,
            description: raw.description,
            url,
            method: raw.method,
            model_name,
            request: raw.request,
            response: raw.response,
        }
    }

    /// The `METHOD+url` key.
    pub fn key(&self) -> InterfaceKey {
        InterfaceKey::new(&self.method, &self.url)
    }

    /// Editor address of this interface in the public catalog.
    pub fn editor_reference(&self, rap_url: &str) -> String {
        format!(
            "{}/repository/editor?id={}&mod={}&itf={}",
            rap_url.trim_end_matches('/'),
            self.repository_id,
            self.module_id,
            self.id
        )
    }
}

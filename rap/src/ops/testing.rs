//! Fixtures shared by the operation tests.

use std::{cell::Cell, str::FromStr};

use rapper_core::{Error, Result, Version};
use rapper_ir::{Method, RawInterface, SchemaSource};
use rapper_manifest::Manifest;
use serde_json::{Value, json};

use crate::catalog::Catalog;

/// Catalog answering from memory and counting list fetches.
pub struct MemoryCatalog {
    pub interfaces: Vec<RawInterface>,
    pub list_fetches: Cell<usize>,
    pub broken_templates: bool,
}

impl MemoryCatalog {
    pub fn new(interfaces: Vec<RawInterface>) -> Self {
        Self {
            interfaces,
            list_fetches: Cell::new(0),
            broken_templates: false,
        }
    }
}

impl Catalog for MemoryCatalog {
    async fn interfaces(&self) -> Result<Vec<RawInterface>> {
        self.list_fetches.set(self.list_fetches.get() + 1);
        Ok(self.interfaces.clone())
    }

    async fn template(&self, interface_id: u64) -> Result<Value> {
        if self.broken_templates {
            return Err(Error::network("template", "memory://template", "connection reset"));
        }
        Ok(json!({ "id": interface_id }))
    }
}

pub fn raw(id: u64, url: &str) -> RawInterface {
    RawInterface {
        id,
        repository_id: 3,
        module_id: 1,
        name: format!("interface {}", id),
        description: String::new(),
        url: url.into(),
        method: Method::new("GET"),
        request: SchemaSource::Schema(json!({
            "type": "object",
            "properties": { "page": { "type": "number" } }
        })),
        response: SchemaSource::Schema(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        })),
    }
}

/// Manifest for project 3 writing to `src/rapper` and scanning `src`.
pub fn manifest(style: &str) -> Manifest {
    Manifest::from_str(&format!(
        "[rapper]\nstyle = \"{}\"\napi_url = \"http://rap2api.taobao.org/repository/get?id=3\"\noutput = \"src/rapper\"\nscan_dirs = [\"src\"]\n",
        style
    ))
    .unwrap()
}

pub fn v(s: &str) -> Version {
    s.parse().unwrap()
}

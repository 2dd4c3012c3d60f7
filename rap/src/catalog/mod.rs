//! Interface catalog access.
//!
//! A sync needs two calls: the interface list of the project and the
//! template payload of each interface. [`HttpCatalog`] answers them from a
//! Rap server.

mod http;
mod rap;

pub use http::HttpCatalog;
use rapper_core::Result;
use rapper_ir::RawInterface;
use serde_json::Value;

/// Source of interface definitions and their template payloads.
pub trait Catalog {
    /// Every interface of the project, in catalog order.
    async fn interfaces(&self) -> Result<Vec<RawInterface>>;

    /// The template payload of one interface.
    async fn template(&self, interface_id: u64) -> Result<Value>;
}

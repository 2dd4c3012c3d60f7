//! Interface data model for rapper.
//!
//! These types carry catalog interfaces through the generation pipeline:
//!
//! ```text
//! catalog (JSON) → RawInterface → normalizer → Interface → codegen
//! ```
//!
//! Normalized [`Interface`] values are never mutated once built; stages share
//! them by reference.

mod interface;
mod schema;

pub use interface::{Interface, InterfaceKey, Method, RawInterface};
pub use schema::SchemaSource;

//! TypeScript syntax builders used by the generators.
//!
//! Builders emit one canonical form (single quotes, semicolons); the
//! formatter applies the configured style afterwards.

mod exports;
mod imports;
mod literal;
mod table;

pub use exports::Export;
pub use imports::Import;
pub use literal::{property_key, string_literal};
pub use table::KeyedTable;

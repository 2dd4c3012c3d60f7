//! TypeScript code generator for rapper.
//!
//! Produces the files consumed by the `rap` runtime package:
//!
//! - `index.ts` - fetch wiring (`fetch`, `overrideFetch`, `createFetch`, `defaultFetch`)
//! - `request.ts` - `IModels`, `IResponseTypes` and the typed fetcher table
//! - `template.ts` - template payloads keyed by `METHOD+url`
//! - `redux.ts` - hooks, action types and selectors (style `redux` only)
//!
//! ```ignore
//! use rapper_codegen::pipeline::Pipeline;
//! use rapper_codegen_typescript::TypeScriptCodegen;
//!
//! let codegen = TypeScriptCodegen::new();
//! let ctx = Pipeline::new(&codegen).run(ctx)?;
//! ```

mod codegen;
mod converter;
mod format;
mod generators;

pub mod ast;

pub use codegen::TypeScriptCodegen;
pub use converter::TsTypeConverter;
pub use format::format;
pub use generators::{BaseGenerator, ReduxGenerator};

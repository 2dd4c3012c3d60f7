//! Language-agnostic generation pipeline for rapper.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`normalize`] - Interface deduplication and model naming
//! - [`convert`] - Type conversion contract and the parallel batch
//! - [`generator`] - Generator contract (fragments, file kinds, inputs)
//! - [`merge`] - Deterministic fragment merging
//! - [`pipeline`] - Phase orchestration with plugin hooks
//! - [`drift`] - Manual-edit and dependency-break detection
//! - [`language`] - Target-language abstraction

pub mod builder;
pub mod convert;
pub mod drift;
pub mod generator;
pub mod language;
pub mod merge;
pub mod normalize;
pub mod pipeline;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use convert::{ConversionError, Model, ModelTable, TypeConverter};
pub use generator::{Extras, FileKind, Fragment, GenerationInput, Generator, GeneratorKind};
pub use language::LanguageCodegen;
pub use normalize::{DroppedInterface, Normalized, normalize};

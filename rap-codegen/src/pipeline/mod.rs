//! Generation pipeline.
//!
//! A [`Pipeline`] runs the generation phases over normalized interfaces:
//!
//! - convert: schema → type text for every interface, in parallel
//! - generate: Base then Extension generators produce fragments
//! - merge: fragments → one text per file
//! - emit: header, formatting pass and content marker per file
//!
//! Plugins receive hooks before and after each phase. Nothing here touches
//! the filesystem; writing is left to the caller.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::Diagnostic;
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;

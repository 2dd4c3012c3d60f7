//! Built-in pipeline phases.

mod convert;
mod emit;
mod generate;
mod merge;

pub use convert::ConvertPhase;
pub use emit::EmitPhase;
pub use generate::GeneratePhase;
pub use merge::MergePhase;

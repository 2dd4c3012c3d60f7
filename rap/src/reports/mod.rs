//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an `Output` target.

mod check;
mod output;
mod sync;
mod update;

pub use check::CheckReport;
pub use output::{Report, TerminalOutput};
pub use sync::{Cancelled, GenerationResult, SyncOutcome, SyncReport};
pub use update::UpgradeHint;

//! Core types for rapper.
//!
//! This crate provides the error taxonomy shared by every stage, the tool
//! version and the version gate, content markers, and the file writer.

mod error;
mod file;
mod gate;
mod marker;
mod version;

pub use error::{Error, Result};
pub use file::{ExistingFile, OutputFile, WriteFailure, WriteReport, read_generated, write_all};
pub use gate::{RecordedVersion, check_dir as check_version_in_dir, check_version, recorded_version};
pub use marker::{Header, MarkerStatus, Stamped, content_hash, stamp, verify};
pub use version::Version;

/// Version of the running tool, embedded in every generated file.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

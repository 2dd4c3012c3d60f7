// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    FormatOptions, Manifest, RapperConfig, RapperToml, Style, UrlMapper, UrlRule, parse_manifest,
    starter_manifest,
};

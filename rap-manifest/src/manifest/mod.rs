//! Manifest types and parsing for rapper.toml files.

mod file;
mod parse;
mod style;
mod url_mapper;

use std::path::PathBuf;

pub use file::{RapperToml, starter_manifest};
pub use parse::parse_manifest;
use serde::Deserialize;
pub use style::Style;
pub use url_mapper::{UrlMapper, UrlRule};

/// Root manifest for rapper.toml
///
/// Built once per run and never mutated afterwards; every stage receives it
/// by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Catalog and output settings
    pub rapper: RapperConfig,

    /// Rewrite rules used to derive model names from interface URLs
    #[serde(default)]
    pub url_mapper: Vec<UrlRule>,

    /// Formatting overrides for generated code
    #[serde(default)]
    pub format: FormatOptions,
}

/// The `[rapper]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RapperConfig {
    /// Integration style (`normal` or `redux`)
    pub style: Style,

    /// Catalog data address (the repository's data endpoint)
    pub api_url: String,

    /// Public catalog front-end address, used for editor links
    #[serde(default = "default_rap_url")]
    pub rap_url: String,

    /// Directory receiving generated files
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Response selector type alias emitted into the request file
    #[serde(default = "default_res_selector")]
    pub res_selector: String,

    /// Consumer source directories scanned for stale interface references
    #[serde(default = "default_scan_dirs")]
    pub scan_dirs: Vec<PathBuf>,

    /// Number of stale references at which the dependency check stops prompting
    #[serde(default = "default_stale_reference_threshold")]
    pub stale_reference_threshold: usize,
}

/// Formatting overrides honored by the code formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Spaces per indentation level
    pub indent: u8,
    /// Use single quotes for string literals
    pub single_quote: bool,
    /// Terminate statements with semicolons
    pub semi: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            single_quote: true,
            semi: false,
        }
    }
}

pub(crate) fn default_rap_url() -> String {
    "http://rap2.taobao.org".to_string()
}

pub(crate) fn default_output() -> PathBuf {
    PathBuf::from("./src/rapper")
}

pub(crate) fn default_res_selector() -> String {
    "type ResSelector<T> = T".to_string()
}

pub(crate) fn default_scan_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("./src")]
}

pub(crate) fn default_stale_reference_threshold() -> usize {
    5
}

impl Manifest {
    /// The URL mapper described by `[[url_mapper]]`.
    pub fn url_mapper(&self) -> UrlMapper {
        UrlMapper::new(self.url_mapper.clone())
    }

    /// Numeric project identifier: the `id` query parameter of `api_url`.
    pub fn project_id(&self) -> Option<u64> {
        let url = url::Url::parse(&self.rapper.api_url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "id")
            .and_then(|(_, value)| value.parse().ok())
    }

    /// Return a copy with a different integration style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.rapper.style = style;
        self
    }
}

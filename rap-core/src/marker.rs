//! Content markers and provenance headers for generated files.
//!
//! Every generated file starts with exactly one marker line,
//! `/* md5: <hex> */`, whose hash covers everything after that line. The
//! body then opens with a provenance header recording the catalog project
//! and the tool version that produced it.

use md5::{Digest, Md5};

use crate::Version;

const MARKER_PREFIX: &str = "/* md5: ";
const MARKER_SUFFIX: &str = " */";
const PROJECT_PREFIX: &str = "/* Rap repository id: ";
const VERSION_PREFIX: &str = "/* Rapper version: ";
const COMMENT_SUFFIX: &str = " */";

/// Hex-encoded md5 of `body`.
pub fn content_hash(body: &str) -> String {
    format!("{:x}", Md5::digest(body.as_bytes()))
}

/// Prepend the marker line for `body`.
pub fn stamp(body: &str) -> String {
    format!("{}{}{}\n{}", MARKER_PREFIX, content_hash(body), MARKER_SUFFIX, body)
}

/// Result of re-hashing a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerStatus {
    /// The file does not start with a marker line.
    Unmarked,
    /// The recorded hash matches the body.
    Intact,
    /// The body was edited after it was written.
    Changed { recorded: String, actual: String },
}

/// A file split into its marker hash and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamped<'a> {
    pub hash: &'a str,
    pub body: &'a str,
}

impl<'a> Stamped<'a> {
    /// Split `content` at its first line, if that line is a marker.
    pub fn parse(content: &'a str) -> Option<Self> {
        let (first, body) = match content.split_once('\n') {
            Some((first, body)) => (first, body),
            None => (content, ""),
        };
        let hash = first
            .trim_end_matches('\r')
            .strip_prefix(MARKER_PREFIX)?
            .strip_suffix(MARKER_SUFFIX)?
            .trim();
        if hash.is_empty() {
            return None;
        }
        Some(Self { hash, body })
    }

    /// Recompute the body hash and compare it with the recorded one.
    pub fn status(&self) -> MarkerStatus {
        let actual = content_hash(self.body);
        if actual == self.hash {
            MarkerStatus::Intact
        } else {
            MarkerStatus::Changed {
                recorded: self.hash.to_string(),
                actual,
            }
        }
    }
}

/// Check a whole file's content against its marker.
pub fn verify(content: &str) -> MarkerStatus {
    match Stamped::parse(content) {
        Some(stamped) => stamped.status(),
        None => MarkerStatus::Unmarked,
    }
}

/// Provenance recorded at the top of every generated body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Public editor address of the catalog repository.
    pub catalog_url: String,
    pub project_id: Option<u64>,
    pub version: Version,
}

impl Header {
    pub fn new(catalog_url: impl Into<String>, project_id: Option<u64>, version: Version) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            project_id,
            version,
        }
    }

    /// Render the header comment block.
    pub fn render(&self) -> String {
        let project = self
            .project_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let editor = match self.project_id {
            Some(id) => format!("{}/repository/editor?id={}", self.catalog_url, id),
            None => self.catalog_url.clone(),
        };
        format!(
            "{PROJECT_PREFIX}{project}{COMMENT_SUFFIX}\n\
             {VERSION_PREFIX}{version}{COMMENT_SUFFIX}\n\
             /* eslint-disable */\n\
             /* tslint:disable */\n\
             // @ts-nocheck\n\
             \n\
             /**\n \
             * This file is generated by rapper from the Rap catalog. Do not edit it by hand:\n \
             * changes are detected and flagged on the next sync.\n \
             * Catalog: {editor}\n \
             */\n",
            version = self.version,
        )
    }

    /// Read the recorded project id from a body, if present.
    pub fn project_id_in(body: &str) -> Option<u64> {
        header_value(body, PROJECT_PREFIX).and_then(|v| v.parse().ok())
    }

    /// Read the recorded tool version from a body, if present and readable.
    pub fn version_in(body: &str) -> Option<Version> {
        Self::version_text_in(body).and_then(|v| v.parse().ok())
    }

    /// The raw `Rapper version` header value, whether or not it parses.
    pub fn version_text_in(body: &str) -> Option<&str> {
        header_value(body, VERSION_PREFIX)
    }
}

fn header_value<'a>(body: &'a str, prefix: &str) -> Option<&'a str> {
    body.lines()
        .take_while(|line| line.starts_with("/*") || line.starts_with("//"))
        .find_map(|line| line.strip_prefix(prefix)?.strip_suffix(COMMENT_SUFFIX))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

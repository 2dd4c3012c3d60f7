use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the first `key =` assignment in the source.
    pub fn span_of_key(&self, key: &str) -> Option<SourceSpan> {
        self.src
            .lines()
            .scan(0usize, |offset, line| {
                let start = *offset;
                *offset += line.len() + 1;
                Some((start, line))
            })
            .find_map(|(start, line)| {
                let trimmed = line.trim_start();
                let rest = trimmed.strip_prefix(key)?;
                if !rest.trim_start().starts_with('=') {
                    return None;
                }
                let indent = line.len() - trimmed.len();
                Some(SourceSpan::from((start + indent, line.trim().len())))
            })
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at `key`, when it can be found.
    pub fn validation_error_at_key(&self, key: &str, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.span_of_key(key),
            message: message.into(),
        })
    }

    /// Create an invalid address error for `key`.
    pub fn invalid_url_error(&self, key: &str, value: &str, reason: impl Into<String>) -> Box<Error> {
        Box::new(Error::InvalidUrl {
            src: self.named_source(),
            span: self.span_of_key(key),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'rapper init' to create a rapper.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rapper.toml")]
    #[diagnostic(code(rapper::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid address '{value}' for '{key}'")]
    #[diagnostic(
        code(rapper::invalid_url),
        help("{reason}; addresses must be absolute http(s) URLs, e.g. 'http://rap2api.taobao.org/repository/get?id=123'")
    )]
    InvalidUrl {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid address")]
        span: Option<SourceSpan>,
        key: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(rapper::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

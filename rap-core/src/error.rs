use std::path::PathBuf;

use thiserror::Error;

use crate::Version;

/// Result type for rapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a sync run before files are written.
///
/// Declining a confirmation is not an error; operations report it as a
/// cancelled outcome instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad configuration or malformed catalog input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The catalog could not be reached or answered with garbage.
    #[error("failed to fetch {what} from '{url}': {message}")]
    Network {
        what: &'static str,
        url: String,
        message: String,
    },

    /// A request or response schema could not be turned into type text.
    #[error("failed to convert interface '{model_name}' ({reference}): {message}")]
    Conversion {
        /// Editor address of the offending interface in the catalog.
        reference: String,
        interface_id: u64,
        model_name: String,
        message: String,
    },

    /// The running tool is older than the one that produced the files on disk.
    #[error(
        "rapper {running} is older than the version that generated '{}' ({recorded}); upgrade rapper before regenerating",
        path.display()
    )]
    VersionConflict {
        running: Version,
        recorded: Version,
        path: PathBuf,
    },

    /// A generated file records a tool version this build cannot read.
    #[error(
        "'{}' was generated by rapper '{recorded}', which this version cannot compare against; upgrade rapper before regenerating",
        path.display()
    )]
    UnreadableVersion { recorded: String, path: PathBuf },

    /// A generator or the merger broke the fragment contract.
    #[error("code generation failed: {0}")]
    Generation(String),

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn network(what: &'static str, url: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            what,
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::{
    Error, Result,
    marker::{self, MarkerStatus, Stamped},
};

/// A final generated file: marker line plus formatted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    path: PathBuf,
    content: String,
    content_hash: String,
}

impl OutputFile {
    /// Stamp `body` with its content hash.
    pub fn new(path: impl Into<PathBuf>, body: &str) -> Self {
        let content_hash = marker::content_hash(body);
        Self {
            path: path.into(),
            content: marker::stamp(body),
            content_hash,
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full content, marker line included.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content without the marker line.
    pub fn body(&self) -> &str {
        Stamped::parse(&self.content)
            .map(|s| s.body)
            .unwrap_or(&self.content)
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

/// A previously generated file found on disk.
#[derive(Debug, Clone)]
pub struct ExistingFile {
    pub path: PathBuf,
    pub content: String,
}

impl ExistingFile {
    pub fn status(&self) -> MarkerStatus {
        marker::verify(&self.content)
    }

    /// Body after the marker line, if the file carries one.
    pub fn body(&self) -> Option<&str> {
        Stamped::parse(&self.content).map(|s| s.body)
    }
}

/// Read every marked file directly inside `dir`.
///
/// A missing directory yields no files. Files without a marker line, or that
/// are not UTF-8, are not ours and are skipped.
pub fn read_generated(dir: &Path) -> Result<Vec<ExistingFile>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            debug!(path = %path.display(), "Skipping non-text file.");
            continue;
        };
        if Stamped::parse(&content).is_some() {
            files.push(ExistingFile { path, content });
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Outcome of persisting a batch of files.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteFailure>,
}

/// One file that could not be persisted.
#[derive(Debug)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub error: std::io::Error,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write all files concurrently.
///
/// Each write stands alone: a failure is recorded for that file and does not
/// undo sibling writes that already succeeded.
pub async fn write_all(files: &[OutputFile]) -> WriteReport {
    let results = join_all(files.iter().map(|file| async move {
        let result = write_file(file.path(), file.content()).await;
        (file.path().to_path_buf(), result)
    }))
    .await;

    let mut report = WriteReport::default();
    for (path, result) in results {
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "Wrote generated file.");
                report.written.push(path);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Failed to write generated file.");
                report.failed.push(WriteFailure { path, error });
            }
        }
    }
    report
}

async fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}

//! Version gate: refuse to let an older tool overwrite newer output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Header, Result, Version, file::ExistingFile};

/// The highest tool version recorded among existing generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVersion {
    pub version: Version,
    pub path: PathBuf,
}

/// Find the newest tool version recorded in `files`.
///
/// A marked file whose version header cannot be read fails the lookup: the
/// gate cannot prove that file was written by an older tool.
pub fn recorded_version(files: &[ExistingFile]) -> Result<Option<RecordedVersion>> {
    let mut newest: Option<RecordedVersion> = None;
    for file in files {
        let Some(text) = file.body().and_then(Header::version_text_in) else {
            continue;
        };
        let version: Version = text.parse().map_err(|_| Error::UnreadableVersion {
            recorded: text.to_string(),
            path: file.path.clone(),
        })?;
        if newest.as_ref().is_none_or(|current| version > current.version) {
            newest = Some(RecordedVersion {
                version,
                path: file.path.clone(),
            });
        }
    }
    Ok(newest)
}

/// Fail if `running` is strictly older than what is recorded on disk.
///
/// There is no confirmation for this case; the caller must stop.
pub fn check_version(running: &Version, recorded: Option<&RecordedVersion>) -> Result<()> {
    let Some(recorded) = recorded else {
        debug!("No recorded tool version; version gate passes.");
        return Ok(());
    };
    if running < &recorded.version {
        return Err(Error::VersionConflict {
            running: running.clone(),
            recorded: recorded.version.clone(),
            path: recorded.path.clone(),
        });
    }
    debug!(%running, recorded = %recorded.version, "Version gate passed.");
    Ok(())
}

/// Run the version gate against the generated files in `dir`.
pub fn check_dir(running: &Version, dir: &Path) -> Result<Option<RecordedVersion>> {
    let files = crate::file::read_generated(dir)?;
    let recorded = recorded_version(&files)?;
    check_version(running, recorded.as_ref())?;
    Ok(recorded)
}

use std::path::{Path, PathBuf};

use super::{Manifest, Style};
use crate::Result;

/// Represents a rapper.toml file with both raw content and parsed manifest.
pub struct RapperToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl RapperToml {
    /// Open and parse a rapper.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Consume the file, keeping only the parsed manifest.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    /// Directory containing the manifest; relative paths resolve against it.
    pub fn root(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

/// Starter rapper.toml written by `rapper init`.
pub fn starter_manifest(style: Style, api_url: &str) -> String {
    format!(
        r#"[rapper]
style = "{style}"
api_url = "{api_url}"
rap_url = "{rap_url}"
output = "{output}"
scan_dirs = ["./src"]
stale_reference_threshold = {threshold}

# Rewrite interface URLs before deriving model names.
# [[url_mapper]]
# strip_prefix = "/api"

[format]
indent = 2
single_quote = true
semi = false
"#,
        style = style,
        api_url = api_url,
        rap_url = super::default_rap_url(),
        output = super::default_output().display(),
        threshold = super::default_stale_reference_threshold(),
    )
}

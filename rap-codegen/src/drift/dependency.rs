//! Dependency-break check: consumer code referencing vanished or changed
//! interfaces.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use rapper_core::{ExistingFile, Header, Result};
use rapper_ir::{Interface, InterfaceKey};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::fingerprint::{ModelRecord, fingerprint, parse_records};

/// Source file extensions searched for references.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "vue"];

/// Why a previously generated interface is no longer valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// The catalog no longer has the interface.
    Removed,
    /// The request or response schema changed.
    Changed,
    /// The interface now maps to a different model name.
    Renamed,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StaleReason::Removed => "removed",
            StaleReason::Changed => "changed",
            StaleReason::Renamed => "renamed",
        })
    }
}

/// An interface recorded by the previous run that the fresh set invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleInterface {
    pub key: InterfaceKey,
    pub model_name: String,
    pub reason: StaleReason,
}

/// One textual reference to a stale interface in consumer code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUsageRecord {
    pub interface_key: InterfaceKey,
    pub reason: StaleReason,
    pub file_path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the referenced name.
    pub column: usize,
}

/// What the caller should do about the findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyVerdict {
    /// No previous run of the same project to compare against.
    NotApplicable,
    /// Nothing references a stale interface.
    Clean,
    /// A few references; the operator must confirm before writing.
    Confirm(Vec<DependencyUsageRecord>),
    /// At or above the threshold: too noisy to list, proceed without asking.
    TooNoisy(Vec<DependencyUsageRecord>),
}

impl DependencyVerdict {
    /// Classify findings against the stale-reference threshold.
    ///
    /// Only `0 < findings < threshold` asks for confirmation.
    pub fn assess(findings: Vec<DependencyUsageRecord>, threshold: usize) -> Self {
        if findings.is_empty() {
            Self::Clean
        } else if findings.len() < threshold {
            Self::Confirm(findings)
        } else {
            Self::TooNoisy(findings)
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Self::Confirm(_))
    }

    pub fn findings(&self) -> &[DependencyUsageRecord] {
        match self {
            Self::Confirm(f) | Self::TooNoisy(f) => f,
            Self::NotApplicable | Self::Clean => &[],
        }
    }
}

/// Inputs of one dependency-break check.
#[derive(Debug, Clone, Copy)]
pub struct DependencyCheck<'a> {
    /// Generated files found in the output directory before this run.
    pub previous: &'a [ExistingFile],
    /// The freshly fetched, normalized interfaces.
    pub fresh: &'a [Interface],
    /// Project identifier of this run.
    pub project_id: Option<u64>,
    /// Consumer directories to search.
    pub scan_dirs: &'a [PathBuf],
    /// The output directory, never searched.
    pub output_dir: &'a Path,
    pub threshold: usize,
}

impl DependencyCheck<'_> {
    /// Run the check. Only reads from disk.
    pub fn run(&self) -> Result<DependencyVerdict> {
        let previous_project = self
            .previous
            .iter()
            .find_map(|file| file.body().and_then(Header::project_id_in));
        if !same_project(previous_project, self.project_id) {
            debug!(?previous_project, current = ?self.project_id, "Skipping dependency scan.");
            return Ok(DependencyVerdict::NotApplicable);
        }

        let records: Vec<ModelRecord> = self
            .previous
            .iter()
            .filter_map(ExistingFile::body)
            .flat_map(parse_records)
            .collect();
        let stale = stale_interfaces(&records, self.fresh);
        if stale.is_empty() {
            return Ok(DependencyVerdict::Clean);
        }
        info!(count = stale.len(), "Found stale interfaces since the last run.");

        let findings = scan_references(self.scan_dirs, self.output_dir, &stale)?;
        Ok(DependencyVerdict::assess(findings, self.threshold))
    }
}

/// The scan only makes sense when both runs target the same known project.
pub fn same_project(previous: Option<u64>, current: Option<u64>) -> bool {
    matches!((previous, current), (Some(a), Some(b)) if a == b)
}

/// Compare recorded models with the fresh interface set.
pub fn stale_interfaces(records: &[ModelRecord], fresh: &[Interface]) -> Vec<StaleInterface> {
    let by_key: HashMap<InterfaceKey, &Interface> = fresh.iter().map(|i| (i.key(), i)).collect();

    records
        .iter()
        .filter_map(|record| {
            let reason = match by_key.get(&record.key) {
                None => StaleReason::Removed,
                Some(itf) if itf.model_name != record.model_name => StaleReason::Renamed,
                Some(itf) if fingerprint(itf) != record.fingerprint => StaleReason::Changed,
                Some(_) => return None,
            };
            Some(StaleInterface {
                key: record.key.clone(),
                model_name: record.model_name.clone(),
                reason,
            })
        })
        .collect()
}

/// Find quoted occurrences of stale model names or keys under `dirs`.
///
/// `exclude`, `node_modules` and hidden directories are skipped. Missing
/// directories are ignored; unreadable files are skipped.
pub fn scan_references(
    dirs: &[PathBuf],
    exclude: &Path,
    stale: &[StaleInterface],
) -> Result<Vec<DependencyUsageRecord>> {
    let exclude = exclude.canonicalize().ok();
    let mut findings = Vec::new();

    for dir in dirs {
        if !dir.exists() {
            debug!(dir = %dir.display(), "Scan directory does not exist.");
            continue;
        }
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e, exclude.as_deref()));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() || !is_source_file(entry.path()) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            findings.extend(find_in_source(entry.path(), &content, stale));
        }
    }

    Ok(findings)
}

fn is_skipped_dir(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name == "node_modules" || name.starts_with('.') {
        return true;
    }
    match (exclude, entry.path().canonicalize()) {
        (Some(exclude), Ok(path)) => path == exclude,
        _ => false,
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn find_in_source(path: &Path, content: &str, stale: &[StaleInterface]) -> Vec<DependencyUsageRecord> {
    let mut findings = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        for itf in stale {
            let mut needles = vec![itf.model_name.as_str()];
            if itf.key.as_str() != itf.model_name {
                needles.push(itf.key.as_str());
            }
            for needle in needles {
                for column in quoted_occurrences(line, needle) {
                    findings.push(DependencyUsageRecord {
                        interface_key: itf.key.clone(),
                        reason: itf.reason,
                        file_path: path.to_path_buf(),
                        line: line_idx + 1,
                        column,
                    });
                }
            }
        }
    }
    findings
}

/// 1-based columns where `needle` appears wrapped in matching quotes.
fn quoted_occurrences(line: &str, needle: &str) -> Vec<usize> {
    let mut columns = Vec::new();
    if needle.is_empty() {
        return columns;
    }
    for (start, _) in line.match_indices(needle) {
        let before = line[..start].chars().next_back();
        let after = line[start + needle.len()..].chars().next();
        let quoted = match (before, after) {
            (Some(open), Some(close)) => open == close && matches!(open, '\'' | '"' | '`'),
            _ => false,
        };
        if quoted {
            columns.push(line[..start].chars().count() + 1);
        }
    }
    columns
}

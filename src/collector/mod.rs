//! Declared-dependency collection.
//!
//! Walks the manifest directory of a project, parses every project file it
//! finds and returns the deduplicated, sorted set of package references.
//! Only declared references are read; nothing is resolved transitively.

mod manifest;

pub use manifest::parse_manifest;

use crate::config::ManifestConfig;
use crate::error::{ErrorContext, NoticeError, Result};
use crate::model::PackageRef;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Collect every declared package reference under `root`.
///
/// The result is sorted by (case-insensitive name, version) with duplicates
/// removed. A missing manifest directory yields an empty list; an unreadable
/// or malformed manifest fails the whole collection.
pub fn collect_packages(root: &Path, config: &ManifestConfig) -> Result<Vec<PackageRef>> {
    let manifests = find_manifests(&root.join(&config.dir), &config.extension)?;
    tracing::debug!("Found {} manifest file(s)", manifests.len());

    let mut packages = BTreeSet::new();
    for path in &manifests {
        let content = std::fs::read_to_string(path).map_err(|e| NoticeError::io(path, e))?;
        let label = path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string();
        let refs = parse_manifest(&content, &label).context("collecting packages")?;
        tracing::debug!("{}: {} package reference(s)", label, refs.len());
        packages.extend(refs);
    }

    Ok(packages.into_iter().collect())
}

/// Recursively list files under `dir` whose name ends with `extension`.
///
/// Paths are returned sorted so diagnostics are stable between runs.
pub fn find_manifests(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.is_dir() {
        scan_dir(dir, extension, &mut found)?;
    } else {
        tracing::debug!("Manifest directory {} does not exist", dir.display());
    }
    found.sort();
    Ok(found)
}

fn scan_dir(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| NoticeError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| NoticeError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            scan_dir(&path, extension, out)?;
        } else if is_manifest(&path, extension) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_manifest(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.len() > extension.len() && name.ends_with(extension))
}

//! Output writing for the notices report and per-component license records.
//!
//! The writer owns the licenses directory: every `*.txt` file in it is
//! deleted before the new records are written, so records of removed
//! components do not linger. Writes are not atomic.
//!
//! # Security
//!
//! All user-controllable data embedded in the Markdown report goes through
//! [`escape::escape_markdown_table`].

pub mod escape;
mod license_file;
mod notices;

pub use license_file::{
    BUNDLED_TEXT_SEPARATOR, plan_file_names, render_license_record, safe_file_name,
};
pub use notices::render_notices;

use crate::config::OutputConfig;
use crate::error::{ErrorContext, NoticeError, ReportErrorKind, Result};
use crate::model::ComponentSet;
use std::path::{Path, PathBuf};

/// What the writer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub notices_path: PathBuf,
    pub licenses_dir: PathBuf,
    /// Number of license records written
    pub license_files: usize,
    /// Number of stale records deleted beforehand
    pub removed_files: usize,
}

/// Write the notices document and one license record per component.
pub fn write_outputs(
    root: &Path,
    output: &OutputConfig,
    components: &ComponentSet,
) -> Result<WrittenOutputs> {
    let notices_path = output.notices_path(root);
    let licenses_dir = output.licenses_path(root);

    if licenses_dir.exists() && !licenses_dir.is_dir() {
        return Err(NoticeError::report(
            "preparing licenses directory",
            ReportErrorKind::InvalidOutputPath(licenses_dir),
        ));
    }

    let removed_files = clear_records(&licenses_dir)?;
    std::fs::create_dir_all(&licenses_dir).map_err(|e| NoticeError::io(&licenses_dir, e))?;

    let planned = plan_file_names(components);
    for (component, file_name) in &planned {
        let record = render_license_record(component)
            .with_context(|| format!("rendering record for {}", component.identity()))?;
        let path = licenses_dir.join(file_name);
        std::fs::write(&path, record).map_err(|e| NoticeError::io(&path, e))?;
    }

    if let Some(parent) = notices_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| NoticeError::io(parent, e))?;
    }
    let document = render_notices(components, &display_label(&output.licenses_dir));
    std::fs::write(&notices_path, document).map_err(|e| NoticeError::io(&notices_path, e))?;

    tracing::debug!(
        "Wrote {} record(s), removed {} stale record(s)",
        planned.len(),
        removed_files
    );

    Ok(WrittenOutputs {
        notices_path,
        licenses_dir,
        license_files: planned.len(),
        removed_files,
    })
}

/// Delete every `*.txt` file directly inside `dir`. Returns how many were removed.
fn clear_records(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    let entries = std::fs::read_dir(dir).map_err(|e| NoticeError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| NoticeError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            std::fs::remove_file(&path).map_err(|e| NoticeError::io(&path, e))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Licenses directory as written in the notices document, always with `/`.
fn display_label(dir: &Path) -> String {
    dir.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, LicenseMetadata, PackageRef};
    use std::fs;
    use tempfile::TempDir;

    fn sample_set() -> ComponentSet {
        vec![Component::from_registry(
            PackageRef::new("Dapper", "2.1.35").unwrap(),
            LicenseMetadata {
                license_name: "SPDX: Apache-2.0".to_string(),
                ..LicenseMetadata::default()
            },
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_stale_records_removed_others_kept() {
        let tmp = TempDir::new().unwrap();
        let licenses = tmp.path().join("LICENSES");
        fs::create_dir_all(&licenses).unwrap();
        fs::write(licenses.join("NuGet_Old_1.0.txt"), "stale").unwrap();
        fs::write(licenses.join("README.md"), "keep me").unwrap();

        let written = write_outputs(tmp.path(), &OutputConfig::default(), &sample_set()).unwrap();

        assert_eq!(written.removed_files, 1);
        assert_eq!(written.license_files, 1);
        assert!(!licenses.join("NuGet_Old_1.0.txt").exists());
        assert!(licenses.join("README.md").exists());
        assert!(licenses.join("NuGet_Dapper_2.1.35.txt").is_file());
        assert!(written.notices_path.is_file());
    }

    #[test]
    fn test_licenses_path_that_is_a_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("LICENSES"), "not a directory").unwrap();

        let err = write_outputs(tmp.path(), &OutputConfig::default(), &sample_set()).unwrap_err();
        assert!(matches!(err, NoticeError::Report { .. }), "{err:?}");
    }

    #[test]
    fn test_nested_output_locations() {
        let tmp = TempDir::new().unwrap();
        let output = OutputConfig {
            notices_file: PathBuf::from("docs/NOTICES.md"),
            licenses_dir: PathBuf::from("docs/licenses"),
        };

        write_outputs(tmp.path(), &output, &sample_set()).unwrap();

        let doc = fs::read_to_string(tmp.path().join("docs/NOTICES.md")).unwrap();
        assert!(doc.contains("`docs/licenses/`"));
        assert!(tmp.path().join("docs/licenses/NuGet_Dapper_2.1.35.txt").is_file());
    }
}

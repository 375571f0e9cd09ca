//! Vendored-code scanner.
//!
//! Every immediate subdirectory of the vendor root is one bundled
//! component. Its license is whatever well-known license file sits at the
//! top of that directory; nested directories are not searched.

use crate::error::{NoticeError, Result};
use crate::model::{Component, LicenseMetadata};
use std::path::{Path, PathBuf};

/// License file names probed in each bundled directory. First match wins.
pub const LICENSE_FILE_CANDIDATES: &[&str] = &[
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "COPYING",
    "COPYING.txt",
    "NOTICE",
    "NOTICE.txt",
];

/// License recorded when a bundled license file is found.
pub const BUNDLED_LICENSE_NAME: &str = "See bundled files";

/// Note recorded when a bundled license file is found.
pub const LICENSE_FILE_COPIED_NOTE: &str = "License file copied from bundled component.";

/// Note recorded when no bundled license file is found.
pub const NO_LICENSE_FILE_NOTE: &str = "No bundled license file detected.";

/// Scan the vendor root for bundled components.
///
/// A missing vendor root yields no components. Components are returned in
/// directory-name order.
pub fn scan_bundled(vendor_root: &Path) -> Result<Vec<Component>> {
    if !vendor_root.is_dir() {
        tracing::debug!("No bundled directory at {}", vendor_root.display());
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(vendor_root).map_err(|e| NoticeError::io(vendor_root, e))?;
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NoticeError::io(vendor_root, e))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.sort();

    let components: Vec<Component> = subdirs.iter().filter_map(|dir| bundled_component(dir)).collect();
    tracing::debug!("Found {} bundled component(s)", components.len());
    Ok(components)
}

/// Return the first license candidate in `dir` that is a regular file.
#[must_use]
pub fn find_license_file(dir: &Path) -> Option<PathBuf> {
    LICENSE_FILE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn bundled_component(dir: &Path) -> Option<Component> {
    // Non-UTF-8 directory names are rendered lossily rather than skipped.
    let name = dir.file_name()?.to_string_lossy().into_owned();

    match find_license_file(dir) {
        Some(file) => {
            tracing::debug!("{}: license file {}", name, file.display());
            let license = LicenseMetadata {
                license_name: BUNDLED_LICENSE_NAME.to_string(),
                notes: LICENSE_FILE_COPIED_NOTE.to_string(),
                ..LicenseMetadata::default()
            };
            Some(Component::bundled(name, license, Some(file)))
        }
        None => {
            tracing::warn!("Bundled component {} has no license file", name);
            Some(Component::bundled(
                name,
                LicenseMetadata::unknown(NO_LICENSE_FILE_NOTE),
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BUNDLED_VERSION, SourceKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_vendor_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let found = scan_bundled(&tmp.path().join("third_party")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_license_file_detected() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("zlib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("LICENSE"), "zlib license text").unwrap();

        let found = scan_bundled(tmp.path()).unwrap();
        assert_eq!(found.len(), 1);
        let component = &found[0];
        assert_eq!(component.name, "zlib");
        assert_eq!(component.version, BUNDLED_VERSION);
        assert_eq!(component.source, SourceKind::Bundled);
        assert_eq!(component.license.license_name, BUNDLED_LICENSE_NAME);
        assert_eq!(component.license.notes, LICENSE_FILE_COPIED_NOTE);
        assert_eq!(component.bundled_license_file, Some(lib.join("LICENSE")));
    }

    #[test]
    fn test_no_candidate_is_unknown() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("mystery");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("README.md"), "hello").unwrap();

        let found = scan_bundled(tmp.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].license.is_unknown());
        assert_eq!(found[0].license.notes, NO_LICENSE_FILE_NOTE);
        assert!(found[0].bundled_license_file.is_none());
    }

    #[test]
    fn test_candidate_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("NOTICE"), "notice").unwrap();
        fs::write(tmp.path().join("COPYING"), "copying").unwrap();
        assert_eq!(
            find_license_file(tmp.path()),
            Some(tmp.path().join("COPYING"))
        );

        fs::write(tmp.path().join("LICENSE.md"), "license").unwrap();
        assert_eq!(
            find_license_file(tmp.path()),
            Some(tmp.path().join("LICENSE.md"))
        );
    }

    #[test]
    fn test_directory_named_like_candidate_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("LICENSE")).unwrap();
        fs::write(tmp.path().join("LICENSE.txt"), "text").unwrap();
        assert_eq!(
            find_license_file(tmp.path()),
            Some(tmp.path().join("LICENSE.txt"))
        );
    }

    #[test]
    fn test_files_in_vendor_root_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README"), "not a component").unwrap();
        fs::create_dir_all(tmp.path().join("b-lib")).unwrap();
        fs::create_dir_all(tmp.path().join("a-lib")).unwrap();

        let names: Vec<_> = scan_bundled(tmp.path())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a-lib", "b-lib"]);
    }
}

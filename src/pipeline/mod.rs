//! Pipeline orchestration for notices generation.
//!
//! collect → fetch → merge bundled → write. Registry failures degrade to
//! placeholder records; everything else aborts the run before or during
//! writing.

use crate::bundled::scan_bundled;
use crate::collector::collect_packages;
use crate::config::AppConfig;
use crate::error::{ErrorContext, NoticeError, Result};
use crate::model::{Component, ComponentSet, SourceKind};
use crate::registry::{MetadataSource, fetch_all};
use crate::reports::write_outputs;
use std::path::{Path, PathBuf};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - outputs generated, or committed outputs are up to date
    pub const SUCCESS: i32 = 0;
    /// Committed outputs differ from a fresh generation
    pub const DRIFT_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

/// Counts and locations from one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub nuget_components: usize,
    pub bundled_components: usize,
    /// Components recorded with the `UNKNOWN` license
    pub unknown_licenses: usize,
    pub license_files: usize,
    pub notices_path: PathBuf,
    pub licenses_dir: PathBuf,
}

impl GenerateSummary {
    #[must_use]
    pub const fn total_components(&self) -> usize {
        self.nuget_components + self.bundled_components
    }

    /// Log the run summary.
    pub fn log_summary(&self) {
        tracing::info!(
            "Generated {} and {} ({} NuGet, {} bundled)",
            self.notices_path.display(),
            self.licenses_dir.display(),
            self.nuget_components,
            self.bundled_components
        );
        if self.unknown_licenses > 0 {
            tracing::warn!(
                "{} component(s) have an UNKNOWN license; review before release",
                self.unknown_licenses
            );
        }
    }
}

/// Regenerate the notices document and license records for `root`.
///
/// The root must be an existing directory. Packages are fetched one at a
/// time through `source`, in collector order.
pub fn generate(
    root: &Path,
    config: &AppConfig,
    source: &dyn MetadataSource,
) -> Result<GenerateSummary> {
    if !root.is_dir() {
        return Err(NoticeError::missing_root(root));
    }

    let packages = collect_packages(root, &config.manifests)?;
    tracing::info!("Found {} declared package(s)", packages.len());

    let (resolved, stats) = fetch_all(source, packages);
    stats.log_summary(source.name());

    let mut components: ComponentSet = resolved
        .into_iter()
        .map(|(package, metadata)| Component::from_registry(package, metadata))
        .collect();

    let bundled = scan_bundled(&config.bundled_path(root)).context("scanning bundled components")?;
    components.extend(bundled);

    let written = write_outputs(root, &config.output, &components).context("writing outputs")?;

    let summary = GenerateSummary {
        nuget_components: components.count_source(SourceKind::NuGet),
        bundled_components: components.count_source(SourceKind::Bundled),
        unknown_licenses: components.unknown_count(),
        license_files: written.license_files,
        notices_path: written.notices_path,
        licenses_dir: written.licenses_dir,
    };
    summary.log_summary();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LicenseMetadata, PackageRef};
    use crate::registry::FetchOutcome;
    use std::fs;
    use tempfile::TempDir;

    struct MitEverywhere;

    impl MetadataSource for MitEverywhere {
        fn fetch(&self, _package: &PackageRef) -> FetchOutcome {
            FetchOutcome::Fetched(LicenseMetadata {
                license_name: "SPDX: MIT".to_string(),
                ..LicenseMetadata::default()
            })
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::DRIFT_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 2);
    }

    #[test]
    fn test_missing_root_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let err = generate(&tmp.path().join("nope"), &AppConfig::default(), &MitEverywhere)
            .unwrap_err();
        assert!(matches!(err, NoticeError::Manifest { .. }), "{err:?}");
        assert!(!tmp.path().join("nope").exists());
    }

    #[test]
    fn test_empty_project_still_writes_outputs() {
        let tmp = TempDir::new().unwrap();
        let summary = generate(tmp.path(), &AppConfig::default(), &MitEverywhere).unwrap();

        assert_eq!(summary.total_components(), 0);
        assert_eq!(summary.license_files, 0);
        assert!(summary.notices_path.is_file());
        assert!(summary.licenses_dir.is_dir());
    }

    #[test]
    fn test_counts() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/App")).unwrap();
        fs::write(
            tmp.path().join("src/App/App.csproj"),
            r#"<Project><ItemGroup>
  <PackageReference Include="Dapper" Version="2.1.35" />
  <PackageReference Include="Polly" Version="8.4.0" />
</ItemGroup></Project>"#,
        )
        .unwrap();
        fs::create_dir_all(tmp.path().join("third_party/nolicense")).unwrap();

        let summary = generate(tmp.path(), &AppConfig::default(), &MitEverywhere).unwrap();
        assert_eq!(summary.nuget_components, 2);
        assert_eq!(summary.bundled_components, 1);
        assert_eq!(summary.unknown_licenses, 1);
        assert_eq!(summary.license_files, 3);
    }
}

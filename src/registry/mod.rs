//! Package registry metadata lookup.
//!
//! Registry failures are never fatal. Every lookup resolves to a
//! [`FetchOutcome`]; an unavailable outcome turns into a placeholder record
//! with the `UNKNOWN` license so the report can always be completed.
//!
//! [`MetadataSource`] is the seam between the pipeline and the network:
//! [`NuGetClient`] talks to the real registry, tests plug in fakes.

mod client;
mod nuspec;

pub use client::{NuGetClient, nuspec_url};
pub use nuspec::{NuspecFields, parse_nuspec, parse_nuspec_fields};

use crate::model::{LicenseMetadata, PackageRef, UNKNOWN_LICENSE};

/// Note recorded on components whose registry metadata could not be retrieved.
pub const UNAVAILABLE_NOTE: &str =
    "Unable to fetch nuspec metadata from nuget.org in this environment.";

/// Result of one registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Metadata was retrieved and parsed
    Fetched(LicenseMetadata),
    /// The lookup failed; `reason` is diagnostic only and never rendered
    Unavailable { reason: String },
}

impl FetchOutcome {
    /// Metadata to record for this outcome: the fetched record, or the
    /// unknown placeholder with an explanatory note.
    #[must_use]
    pub fn into_metadata(self) -> LicenseMetadata {
        match self {
            Self::Fetched(mut metadata) => {
                if metadata.license_name.trim().is_empty() {
                    metadata.license_name = UNKNOWN_LICENSE.to_string();
                }
                metadata
            }
            Self::Unavailable { .. } => LicenseMetadata::unknown(UNAVAILABLE_NOTE),
        }
    }

    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// A source of license metadata for declared packages.
pub trait MetadataSource {
    /// Look up one package. Must not fail: errors become
    /// [`FetchOutcome::Unavailable`].
    fn fetch(&self, package: &PackageRef) -> FetchOutcome;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Counters for one run of registry lookups.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStats {
    /// Lookups that returned metadata
    pub fetched: usize,
    /// Lookups that degraded to the placeholder
    pub unavailable: usize,
}

impl FetchStats {
    /// Record an outcome.
    pub fn record(&mut self, outcome: &FetchOutcome) {
        if outcome.is_fetched() {
            self.fetched += 1;
        } else {
            self.unavailable += 1;
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.fetched + self.unavailable
    }

    /// Log a summary of the lookups.
    pub fn log_summary(&self, source: &str) {
        tracing::info!(
            "Registry lookups ({}): {} fetched, {} unavailable",
            source,
            self.fetched,
            self.unavailable
        );
        if self.unavailable > 0 {
            tracing::warn!(
                "{} package(s) recorded with an UNKNOWN license",
                self.unavailable
            );
        }
    }
}

/// Fetch metadata for every package, in order.
///
/// Returns each package paired with the metadata to record, plus counters.
pub fn fetch_all(
    source: &dyn MetadataSource,
    packages: Vec<PackageRef>,
) -> (Vec<(PackageRef, LicenseMetadata)>, FetchStats) {
    let mut stats = FetchStats::default();
    let mut resolved = Vec::with_capacity(packages.len());

    for package in packages {
        let outcome = source.fetch(&package);
        stats.record(&outcome);
        if let FetchOutcome::Unavailable { reason } = &outcome {
            tracing::warn!("No metadata for {}: {}", package, reason);
        }
        resolved.push((package, outcome.into_metadata()));
    }

    (resolved, stats)
}

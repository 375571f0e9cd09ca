//! **Third-party notices for NuGet projects, and a CI check that keeps them current.**
//!
//! `notice-gen` scans a repository's `.csproj` manifests for declared
//! `PackageReference` items, looks each package up on a NuGet flat-container
//! registry, adds any vendored code found under `third_party/`, and writes:
//!
//! - `THIRD_PARTY_NOTICES.md`: one Markdown table row per component;
//! - `LICENSES/*.txt`: one plain-text license record per component, with
//!   bundled license files embedded verbatim.
//!
//! Registry lookups fail open: a package whose metadata cannot be fetched
//! is still listed, with an `UNKNOWN` license and an explanatory note.
//! Structural problems (missing root, malformed manifest, write failures)
//! fail closed.
//!
//! ## Core Concepts & Modules
//!
//! - **[`collector`]**: reads declared package references from manifests.
//! - **[`registry`]**: [`MetadataSource`] and the [`NuGetClient`] that fetches
//!   and parses `.nuspec` documents.
//! - **[`bundled`]**: scans vendored directories for license files.
//! - **[`reports`]**: renders and writes the notices document and records.
//! - **[`pipeline`]**: the end-to-end [`generate`] operation.
//! - **[`check`]**: the [`DriftChecker`], which regenerates and asks git
//!   whether the committed outputs are stale.
//!
//! ## Getting Started
//!
//! ```no_run
//! use notice_gen::{AppConfig, NuGetClient, generate};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let client = NuGetClient::new(config.registry.clone());
//!     let summary = generate(Path::new("."), &config, &client)?;
//!     println!(
//!         "{} components, {} with unknown licenses",
//!         summary.total_components(),
//!         summary.unknown_licenses
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `registry` (default): HTTP lookups through `reqwest`. Without it every
//!   lookup reports the package as unavailable.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors sections would repeat the error enum on every fs-touching fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod bundled;
pub mod check;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use check::{DriftChecker, DriftOutcome};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, OutputConfig, Validatable};
pub use error::{ErrorContext, NoticeError, Result};
pub use model::{Component, ComponentSet, LicenseMetadata, PackageRef, SourceKind};
pub use pipeline::{GenerateSummary, exit_codes, generate};
pub use registry::{FetchOutcome, MetadataSource, NuGetClient};

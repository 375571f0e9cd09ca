//! Configuration types for notice-gen.

use super::defaults::{
    DEFAULT_BUNDLED_DIR, DEFAULT_LICENSES_DIR, DEFAULT_MANIFEST_DIR, DEFAULT_MANIFEST_EXTENSION,
    DEFAULT_NOTICES_FILE, DEFAULT_REGISTRY_TIMEOUT_SECS, DEFAULT_REGISTRY_URL,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from `.notice-gen.yaml` and overridden
/// by CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where generated files are written
    pub output: OutputConfig,
    /// Which project files declare dependencies
    pub manifests: ManifestConfig,
    /// Where vendored components live
    pub bundled: BundledConfig,
    /// Package registry settings
    pub registry: RegistryConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Absolute path of the vendored-code root under `root`.
    #[must_use]
    pub fn bundled_path(&self, root: &Path) -> PathBuf {
        root.join(&self.bundled.dir)
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the notices file path.
    pub fn notices_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output.notices_file = path.into();
        self
    }

    /// Set the licenses directory.
    pub fn licenses_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output.licenses_dir = path.into();
        self
    }

    /// Set the manifest search directory.
    pub fn manifest_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifests.dir = path.into();
        self
    }

    /// Set the vendored-code directory.
    pub fn bundled_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.bundled.dir = path.into();
        self
    }

    /// Set the registry base URL.
    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry.base_url = url.into();
        self
    }

    /// Set the registry timeout.
    pub const fn registry_timeout_secs(mut self, secs: u64) -> Self {
        self.config.registry.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Output locations, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Aggregate Markdown notices file
    pub notices_file: PathBuf,
    /// Directory of per-component license records
    pub licenses_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            notices_file: PathBuf::from(DEFAULT_NOTICES_FILE),
            licenses_dir: PathBuf::from(DEFAULT_LICENSES_DIR),
        }
    }
}

impl OutputConfig {
    #[must_use]
    pub fn notices_path(&self, root: &Path) -> PathBuf {
        root.join(&self.notices_file)
    }

    #[must_use]
    pub fn licenses_path(&self, root: &Path) -> PathBuf {
        root.join(&self.licenses_dir)
    }
}

/// Manifest discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ManifestConfig {
    /// Directory searched recursively, relative to the project root
    pub dir: PathBuf,
    /// File name suffix of project manifests
    pub extension: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_MANIFEST_DIR),
            extension: DEFAULT_MANIFEST_EXTENSION.to_string(),
        }
    }
}

/// Vendored-code discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BundledConfig {
    /// Directory whose immediate subdirectories are components
    pub dir: PathBuf,
}

impl Default for BundledConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_BUNDLED_DIR),
        }
    }
}

/// Registry client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RegistryConfig {
    /// Flat-container base URL; `{id}/{version}/{id}.nuspec` is appended
    pub base_url: String,
    /// Per-request timeout in seconds
    #[schemars(range(min = 1, max = 300))]
    pub timeout_secs: u64,
    /// Custom User-Agent header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_REGISTRY_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl RegistryConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("notice-gen/{}", env!("CARGO_PKG_VERSION")))
    }
}

//! Configuration module for notice-gen.
//!
//! - Type-safe configuration structures with defaults
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//!
//! # Configuration File
//!
//! Place a `.notice-gen.yaml` file in the project root:
//!
//! ```yaml
//! bundled:
//!   dir: vendor
//! registry:
//!   timeout_secs: 10
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_BUNDLED_DIR, DEFAULT_LICENSES_DIR, DEFAULT_MANIFEST_DIR, DEFAULT_MANIFEST_EXTENSION,
    DEFAULT_NOTICES_FILE, DEFAULT_REGISTRY_TIMEOUT_SECS, DEFAULT_REGISTRY_URL,
};
pub use types::{
    AppConfig, AppConfigBuilder, BundledConfig, ManifestConfig, OutputConfig, RegistryConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, default_project_root, discover_config_file, find_git_root,
    generate_full_example_config, load_config_file, load_or_default, search_dirs,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

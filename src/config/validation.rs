//! Configuration validation for notice-gen.

use super::defaults::MAX_REGISTRY_TIMEOUT_SECS;
use super::types::{AppConfig, BundledConfig, ManifestConfig, OutputConfig, RegistryConfig};
use std::path::{Component, Path};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.manifests.validate());
        errors.extend(self.bundled.validate());
        errors.extend(self.registry.validate());

        if self.output.notices_file == self.output.licenses_dir {
            errors.push(ConfigError::new(
                "output.licenses_dir",
                "must differ from output.notices_file",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_relative(&mut errors, "output.notices_file", &self.notices_file);
        check_relative(&mut errors, "output.licenses_dir", &self.licenses_dir);
        errors
    }
}

impl Validatable for ManifestConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_relative(&mut errors, "manifests.dir", &self.dir);
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            errors.push(ConfigError::new(
                "manifests.extension",
                format!("'{}' must start with '.' followed by a suffix", self.extension),
            ));
        }
        errors
    }
}

impl Validatable for BundledConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_relative(&mut errors, "bundled.dir", &self.dir);
        errors
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "registry.base_url",
                format!("'{}' must be an http:// or https:// URL", self.base_url),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_REGISTRY_TIMEOUT_SECS {
            errors.push(ConfigError::new(
                "registry.timeout_secs",
                format!(
                    "{} is out of range (1-{MAX_REGISTRY_TIMEOUT_SECS})",
                    self.timeout_secs
                ),
            ));
        }
        if self.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
            errors.push(ConfigError::new("registry.user_agent", "must not be blank"));
        }
        errors
    }
}

/// Output and input locations must stay inside the project root.
fn check_relative(errors: &mut Vec<ConfigError>, field: &str, path: &Path) {
    if path.as_os_str().is_empty() {
        errors.push(ConfigError::new(field, "must not be empty"));
    } else if path.is_absolute() {
        errors.push(ConfigError::new(
            field,
            format!("'{}' must be relative to the project root", path.display()),
        ));
    } else if path.components().any(|c| matches!(c, Component::ParentDir)) {
        errors.push(ConfigError::new(
            field,
            format!("'{}' must not contain '..'", path.display()),
        ));
    }
}

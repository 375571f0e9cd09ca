//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".notice-gen.yaml",
    ".notice-gen.yml",
    "notice-gen.yaml",
    "notice-gen.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Project root
/// 3. Current directory
/// 4. User config directory (~/.config/notice-gen/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    search_dirs(root)
        .into_iter()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Directories searched for a config file, in order.
#[must_use]
pub fn search_dirs(root: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![root.to_path_buf()];
    if let Ok(cwd) = std::env::current_dir()
        && cwd != root
    {
        candidates.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("notice-gen"));
    }
    candidates
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Find the git work-tree root by walking up from `start`.
#[must_use]
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Default project root: the enclosing git work tree, else the current directory.
pub fn default_project_root() -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(find_git_root(&cwd).unwrap_or(cwd))
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from the discovered file, or return defaults.
///
/// An explicitly requested file that cannot be loaded is an error; a
/// discovered file that fails to parse is reported and ignored.
pub fn load_or_default(
    explicit_path: Option<&Path>,
    root: &Path,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    let Some(path) = discover_config_file(explicit_path, root) else {
        return Ok((AppConfig::default(), None));
    };

    match load_config_file(&path) {
        Ok(config) => Ok((config, Some(path))),
        Err(e) if explicit_path.is_some() => Err(e),
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            Ok((AppConfig::default(), None))
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# notice-gen configuration
# =========================
#
# Place this file at .notice-gen.yaml in the project root, or at
# ~/.config/notice-gen/notice-gen.yaml for a user-wide default.
# CLI arguments always override file settings.

# Generated output, relative to the project root
output:
  notices_file: THIRD_PARTY_NOTICES.md
  licenses_dir: LICENSES

# Project manifests scanned for PackageReference items
manifests:
  # Searched recursively
  dir: src
  extension: .csproj

# Vendored code: each immediate subdirectory is one component
bundled:
  dir: third_party

# Package registry
registry:
  base_url: https://api.nuget.org/v3-flatcontainer
  # Per-request timeout in seconds (1-300)
  timeout_secs: 20
  # user_agent: my-org-notices/1.0
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

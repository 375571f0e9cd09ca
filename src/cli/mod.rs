//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each one takes an already-resolved
//! project root and configuration and returns the process exit code.

mod check;
mod generate;

pub use check::run_check;
pub use generate::run_generate;

use crate::config::{self, AppConfig, Validatable};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the project root: the explicit `--root` made absolute, else the
/// enclosing git work tree, else the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => std::path::absolute(path)
            .with_context(|| format!("cannot resolve project root {}", path.display())),
        None => config::default_project_root().context("cannot determine current directory"),
    }
}

/// Load the configuration for `root` from an explicit or discovered file.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<(AppConfig, Option<PathBuf>)> {
    let (config, loaded_from) = config::load_or_default(explicit, root)?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded configuration from {}", path.display());
    }
    Ok((config, loaded_from))
}

/// Reject a configuration with any validation error, listing all of them.
pub fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!("invalid configuration:\n  {}", listed.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_is_made_absolute() {
        let root = resolve_root(Some(Path::new("some/project"))).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("some/project"));
    }

    #[test]
    fn test_ensure_valid_lists_errors() {
        let mut config = AppConfig::default();
        config.registry.timeout_secs = 0;
        config.manifests.extension = "csproj".to_string();
        let message = ensure_valid(&config).unwrap_err().to_string();
        assert!(message.contains("registry.timeout_secs"), "{message}");
        assert!(message.contains("manifests.extension"), "{message}");
        assert!(ensure_valid(&AppConfig::default()).is_ok());
    }
}

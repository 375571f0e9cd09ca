//! Generate command handler.
//!
//! Implements the `generate` subcommand: regenerate the notices document
//! and the license records from manifests, the registry and vendored code.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, generate};
use crate::registry::NuGetClient;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the generate command
pub fn run_generate(root: &Path, config: &AppConfig, quiet: bool) -> Result<i32> {
    #[cfg(not(feature = "registry"))]
    eprintln!(
        "Warning: the 'registry' feature is not enabled; every package will be recorded as UNKNOWN. \
         Rebuild with: cargo build --features registry"
    );

    let client = NuGetClient::new(config.registry.clone());
    let summary = generate(root, config, &client)
        .with_context(|| format!("generating notices for {}", root.display()))?;

    if !quiet {
        println!(
            "Generated {} and {}/*.txt",
            summary.notices_path.display(),
            summary.licenses_dir.display()
        );
    }
    Ok(exit_codes::SUCCESS)
}

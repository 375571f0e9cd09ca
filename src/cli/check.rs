//! Check command handler.
//!
//! Implements the `check` subcommand: regenerate in place and fail if the
//! committed outputs were stale.

use crate::check::DriftChecker;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the check command
///
/// `config_file` is forwarded to the generator child so both processes see
/// the same configuration.
pub fn run_check(root: &Path, config: &AppConfig, config_file: Option<&Path>) -> Result<i32> {
    let mut checker = DriftChecker::new(
        root,
        &config.output.notices_file,
        &config.output.licenses_dir,
    )?;

    if let Some(file) = config_file {
        let exe = std::env::current_exe().context("cannot locate own executable")?;
        checker = checker.with_generator(
            exe,
            vec![
                "--config".to_string(),
                file.display().to_string(),
                "generate".to_string(),
            ],
        );
    }

    let outcome = checker.run()?;
    print!(
        "{}",
        outcome.render(
            &config.output.notices_file.display().to_string(),
            &config.output.licenses_dir.display().to_string(),
        )
    );
    Ok(outcome.exit_code())
}

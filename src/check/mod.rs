//! Drift detection between committed outputs and a fresh generation.
//!
//! The checker regenerates the outputs in place by running the generator as
//! a child process, then asks git whether the working tree now differs from
//! the index or contains untracked output files. Comparison is git's own
//! byte-level diff with no whitespace or line-ending normalization.

use crate::error::{CheckErrorKind, NoticeError, Result};
use crate::pipeline::exit_codes;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Result of a drift check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftOutcome {
    /// Regenerated outputs match what is committed
    UpToDate,
    /// The generator exited unsuccessfully
    GenerationFailed { code: i32 },
    /// Tracked outputs changed; `diff` is git's output
    Drift { diff: String },
    /// Output files exist that git does not track
    Untracked { files: Vec<String> },
}

impl DriftOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UpToDate => exit_codes::SUCCESS,
            Self::GenerationFailed { code } => *code,
            Self::Drift { .. } | Self::Untracked { .. } => exit_codes::DRIFT_DETECTED,
        }
    }

    /// User-facing message for this outcome.
    ///
    /// Generation failures have no message of their own; the generator's
    /// output already explains them.
    #[must_use]
    pub fn render(&self, notices: &str, licenses: &str) -> String {
        match self {
            Self::UpToDate => {
                format!("[OK] {notices} and {licenses} are present and up-to-date.\n")
            }
            Self::GenerationFailed { .. } => String::new(),
            Self::Drift { diff } => {
                let mut message = format!(
                    "[ERROR] {notices} and/or {licenses} are out of date. Run generator and commit changes.\n"
                );
                message.push_str(diff);
                if !message.ends_with('\n') {
                    message.push('\n');
                }
                message
            }
            Self::Untracked { files } => {
                let mut message = "[ERROR] Untracked notices/license files detected:\n".to_string();
                for file in files {
                    message.push_str(file);
                    message.push('\n');
                }
                message
            }
        }
    }
}

/// Runs the generator and the git comparisons for one project root.
#[derive(Debug, Clone)]
pub struct DriftChecker {
    root: PathBuf,
    notices_file: PathBuf,
    licenses_dir: PathBuf,
    generator: PathBuf,
    generator_args: Vec<String>,
}

impl DriftChecker {
    /// Create a checker for outputs at `notices_file` and `licenses_dir`
    /// (relative to `root`).
    ///
    /// The generator defaults to `<current executable> generate`; the
    /// checker always appends `--root <root>`.
    pub fn new(
        root: impl Into<PathBuf>,
        notices_file: impl Into<PathBuf>,
        licenses_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let generator = std::env::current_exe().map_err(|e| {
            NoticeError::check(
                "locating generator",
                CheckErrorKind::NoGenerator(e.to_string()),
            )
        })?;
        Ok(Self {
            root: root.into(),
            notices_file: notices_file.into(),
            licenses_dir: licenses_dir.into(),
            generator,
            generator_args: vec!["generate".to_string()],
        })
    }

    /// Use a different generator program and leading arguments.
    #[must_use]
    pub fn with_generator(mut self, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.generator = program.into();
        self.generator_args = args;
        self
    }

    /// Run the generator, then compare against git.
    ///
    /// Generator output is re-emitted on this process's stdout and stderr.
    pub fn run(&self) -> Result<DriftOutcome> {
        let mut generator = Command::new(&self.generator);
        generator
            .args(&self.generator_args)
            .arg("--root")
            .arg(&self.root);
        let generated = spawn(&mut generator, &self.generator.display().to_string())?;
        relay(&generated);

        if !generated.status.success() {
            // A child killed by a signal has no exit code.
            let code = generated.status.code().unwrap_or(1);
            tracing::debug!("Generator exited with {}", generated.status);
            return Ok(DriftOutcome::GenerationFailed { code });
        }

        let diff = self.git(&["diff", "--exit-code", "--"])?;
        if !diff.status.success() {
            let mut text = String::from_utf8_lossy(&diff.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&diff.stderr));
            return Ok(DriftOutcome::Drift { diff: text });
        }

        let others = self.git(&["ls-files", "--others", "--exclude-standard", "--"])?;
        if others.status.success() {
            let files: Vec<String> = String::from_utf8_lossy(&others.stdout)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect();
            if !files.is_empty() {
                return Ok(DriftOutcome::Untracked { files });
            }
        } else {
            tracing::warn!(
                "git ls-files failed: {}",
                String::from_utf8_lossy(&others.stderr).trim()
            );
        }

        Ok(DriftOutcome::UpToDate)
    }

    /// Run git in the root with `args` followed by the two output paths.
    fn git(&self, args: &[&str]) -> Result<Output> {
        let mut command = Command::new("git");
        command
            .args(args)
            .arg(&self.notices_file)
            .arg(&self.licenses_dir)
            .current_dir(&self.root);
        spawn(&mut command, "git")
    }
}

fn spawn(command: &mut Command, program: &str) -> Result<Output> {
    tracing::debug!("Running {:?}", command);
    command.output().map_err(|e| {
        NoticeError::check(
            "running drift check",
            CheckErrorKind::SpawnFailed {
                program: program.to_string(),
                message: e.to_string(),
            },
        )
    })
}

/// Forward captured child output to our own streams.
fn relay(output: &Output) {
    let _ = std::io::stdout().write_all(&output.stdout);
    let _ = std::io::stderr().write_all(&output.stderr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DriftOutcome::UpToDate.exit_code(), 0);
        assert_eq!(
            DriftOutcome::Drift {
                diff: String::new()
            }
            .exit_code(),
            1
        );
        assert_eq!(DriftOutcome::Untracked { files: vec![] }.exit_code(), 1);
        assert_eq!(DriftOutcome::GenerationFailed { code: 7 }.exit_code(), 7);
    }

    #[test]
    fn test_messages() {
        let ok = DriftOutcome::UpToDate.render("THIRD_PARTY_NOTICES.md", "LICENSES");
        assert_eq!(
            ok,
            "[OK] THIRD_PARTY_NOTICES.md and LICENSES are present and up-to-date.\n"
        );

        let drift = DriftOutcome::Drift {
            diff: "-old\n+new".to_string(),
        }
        .render("N.md", "L");
        assert_eq!(
            drift,
            "[ERROR] N.md and/or L are out of date. Run generator and commit changes.\n-old\n+new\n"
        );

        let untracked = DriftOutcome::Untracked {
            files: vec!["LICENSES/NuGet_A_1.0.txt".to_string()],
        }
        .render("N.md", "L");
        assert_eq!(
            untracked,
            "[ERROR] Untracked notices/license files detected:\nLICENSES/NuGet_A_1.0.txt\n"
        );
    }

    #[test]
    fn test_missing_generator_is_structural_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let checker = DriftChecker::new(tmp.path(), "N.md", "L")
            .unwrap()
            .with_generator(tmp.path().join("does-not-exist"), vec![]);
        let err = checker.run().unwrap_err();
        assert!(matches!(err, NoticeError::Check { .. }), "{err:?}");
    }
}

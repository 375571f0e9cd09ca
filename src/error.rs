//! Unified error types for notice-gen.
//!
//! Registry lookups never surface here: they degrade to a placeholder record
//! inside the `registry` module. Everything in this module is a structural
//! failure that aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for notice-gen operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NoticeError {
    /// Errors while reading or parsing a dependency manifest
    #[error("Failed to read manifest: {context}")]
    Manifest {
        context: String,
        #[source]
        source: ManifestErrorKind,
    },

    /// Errors while decoding registry metadata
    #[error("Registry metadata error: {context}")]
    Registry {
        context: String,
        #[source]
        source: RegistryErrorKind,
    },

    /// Errors while writing the notices report or license records
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// Errors while running the drift check
    #[error("Drift check failed: {context}")]
    Check {
        context: String,
        #[source]
        source: CheckErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

}

/// Specific manifest error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ManifestErrorKind {
    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),

    #[error("Project root does not exist or is not a directory: {0}")]
    MissingRoot(PathBuf),
}

/// Specific registry error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegistryErrorKind {
    #[error("Invalid nuspec document: {0}")]
    InvalidNuspec(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Registry returned HTTP {0}")]
    HttpStatus(u16),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Output path is not usable: {0}")]
    InvalidOutputPath(PathBuf),
}

/// Specific drift check error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckErrorKind {
    #[error("Failed to spawn `{program}`: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Cannot determine generator executable: {0}")]
    NoGenerator(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for notice-gen operations
pub type Result<T> = std::result::Result<T, NoticeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl NoticeError {
    /// Create a manifest error with context
    pub fn manifest(context: impl Into<String>, source: ManifestErrorKind) -> Self {
        Self::Manifest {
            context: context.into(),
            source,
        }
    }

    /// Create a manifest error for malformed XML
    pub fn invalid_xml(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::manifest(
            format!("at {}", path.into()),
            ManifestErrorKind::InvalidXml(message.into()),
        )
    }

    /// Create a manifest error for a missing project root
    pub fn missing_root(path: impl Into<PathBuf>) -> Self {
        Self::manifest(
            "checking project root",
            ManifestErrorKind::MissingRoot(path.into()),
        )
    }

    /// Create a registry error with context
    pub fn registry(context: impl Into<String>, source: RegistryErrorKind) -> Self {
        Self::Registry {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create a check error with context
    pub fn check(context: impl Into<String>, source: CheckErrorKind) -> Self {
        Self::Check {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for NoticeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so a failure deep in manifest
/// parsing reads like `collecting packages: at src/App/App.csproj`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on error).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<NoticeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: NoticeError, new_ctx: &str) -> NoticeError {
    match err {
        NoticeError::Manifest {
            context: existing,
            source,
        } => NoticeError::Manifest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NoticeError::Registry {
            context: existing,
            source,
        } => NoticeError::Registry {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NoticeError::Report {
            context: existing,
            source,
        } => NoticeError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NoticeError::Check {
            context: existing,
            source,
        } => NoticeError::Check {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NoticeError::Io {
            path,
            message,
            source,
        } => NoticeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

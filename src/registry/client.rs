//! Blocking NuGet flat-container client.

use super::nuspec::parse_nuspec;
use super::{FetchOutcome, MetadataSource};
use crate::config::RegistryConfig;
use crate::error::{NoticeError, RegistryErrorKind, Result};
use crate::model::PackageRef;

/// Fetches nuspec documents from a NuGet V3 flat-container endpoint.
///
/// One HTTP client is built up front and reused for every sequential
/// lookup. Each lookup is independent: no retry, no cache.
pub struct NuGetClient {
    config: RegistryConfig,
    #[cfg(feature = "registry")]
    http: Option<reqwest::blocking::Client>,
}

impl NuGetClient {
    /// Create a new client.
    ///
    /// If the HTTP client cannot be constructed (e.g. TLS backend failure)
    /// the error is logged and every lookup degrades to unavailable.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        #[cfg(feature = "registry")]
        {
            let http = reqwest::blocking::Client::builder()
                .timeout(config.timeout())
                .user_agent(config.user_agent())
                .build()
                .map_err(|e| tracing::warn!("Cannot build HTTP client: {}", e))
                .ok();
            Self { config, http }
        }
        #[cfg(not(feature = "registry"))]
        {
            Self { config }
        }
    }

    /// URL of the nuspec for a package: `{base}/{id}/{version}/{id}.nuspec`,
    /// with id and version lower-cased.
    #[must_use]
    pub fn nuspec_url(&self, name: &str, version: &str) -> String {
        nuspec_url(&self.config.base_url, name, version)
    }

    /// Download the raw nuspec body.
    #[cfg(feature = "registry")]
    fn download(&self, url: &str) -> Result<String> {
        let http = self.http.as_ref().ok_or_else(|| {
            NoticeError::registry(
                url,
                RegistryErrorKind::NetworkError("HTTP client unavailable".to_string()),
            )
        })?;

        let response = http
            .get(url)
            .header("Accept", "application/xml")
            .send()
            .map_err(|e| {
                NoticeError::registry(url, RegistryErrorKind::NetworkError(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NoticeError::registry(
                url,
                RegistryErrorKind::HttpStatus(status.as_u16()),
            ));
        }

        response
            .text()
            .map_err(|e| NoticeError::registry(url, RegistryErrorKind::NetworkError(e.to_string())))
    }

    #[cfg(not(feature = "registry"))]
    fn download(&self, url: &str) -> Result<String> {
        Err(NoticeError::registry(
            url,
            RegistryErrorKind::NetworkError("registry feature not enabled".to_string()),
        ))
    }
}

impl MetadataSource for NuGetClient {
    fn fetch(&self, package: &PackageRef) -> FetchOutcome {
        let url = self.nuspec_url(&package.name, &package.version);
        tracing::debug!("Fetching {}", url);

        match self.download(&url).and_then(|body| parse_nuspec(&body)) {
            Ok(metadata) => FetchOutcome::Fetched(metadata),
            Err(e) => FetchOutcome::Unavailable {
                reason: error_chain(&e),
            },
        }
    }

    fn name(&self) -> &'static str {
        "nuget"
    }
}

/// Render an error with all of its sources, outermost first.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        source = inner.source();
    }
    rendered
}

/// Build a nuspec URL from a base URL and package coordinates.
#[must_use]
pub fn nuspec_url(base_url: &str, name: &str, version: &str) -> String {
    let id = name.to_lowercase();
    let version = version.to_lowercase();
    format!("{}/{id}/{version}/{id}.nuspec", base_url.trim_end_matches('/'))
}

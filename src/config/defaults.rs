//! Default values for notice-gen configuration.

/// Aggregate notices file, relative to the project root.
pub const DEFAULT_NOTICES_FILE: &str = "THIRD_PARTY_NOTICES.md";

/// Per-component license record directory, relative to the project root.
pub const DEFAULT_LICENSES_DIR: &str = "LICENSES";

/// Directory searched recursively for project manifests.
pub const DEFAULT_MANIFEST_DIR: &str = "src";

/// Manifest file suffix.
pub const DEFAULT_MANIFEST_EXTENSION: &str = ".csproj";

/// Directory whose immediate children are vendored components.
pub const DEFAULT_BUNDLED_DIR: &str = "third_party";

/// NuGet V3 flat-container endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://api.nuget.org/v3-flatcontainer";

/// Per-request timeout for registry lookups, in seconds.
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 20;

/// Upper bound accepted for the registry timeout, in seconds.
pub const MAX_REGISTRY_TIMEOUT_SECS: u64 = 300;

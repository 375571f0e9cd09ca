//! License metadata and the license-reference kinds a nuspec can declare.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used whenever license metadata cannot be determined.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// How a package declares its license.
///
/// The registry distinguishes a machine-readable expression from a reference
/// to a file shipped inside the package; the distinction survives into the
/// rendered string as a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseReference {
    /// SPDX license expression, e.g. `MIT OR Apache-2.0`
    Expression(String),
    /// Path of a license file inside the package
    File(String),
    /// Free text with no declared kind
    Text(String),
    /// Nothing declared
    None,
}

impl LicenseReference {
    /// Build a reference from a nuspec `<license type="...">value</license>` pair.
    ///
    /// The type attribute is compared case-insensitively. An empty value
    /// always yields [`LicenseReference::None`].
    #[must_use]
    pub fn from_declared(kind: Option<&str>, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::None;
        }
        match kind.map(str::to_ascii_lowercase).as_deref() {
            Some("expression") => Self::Expression(value.to_string()),
            Some("file") => Self::File(value.to_string()),
            _ => Self::Text(value.to_string()),
        }
    }

    /// The string stored in reports for this reference.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LicenseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "SPDX: {expr}"),
            Self::File(name) => write!(f, "License file: {name}"),
            Self::Text(text) => f.write_str(text),
            Self::None => f.write_str(UNKNOWN_LICENSE),
        }
    }
}

/// License and provenance metadata attached to a component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicenseMetadata {
    /// License identifier, expression or placeholder; never empty once built
    pub license_name: String,
    /// URL of the license text, if the registry reported one
    pub license_url: String,
    /// Project homepage
    pub homepage: String,
    /// Free-text remarks shown in the per-component record
    pub notes: String,
}

impl LicenseMetadata {
    /// Metadata for a component whose license could not be determined.
    pub fn unknown(notes: impl Into<String>) -> Self {
        Self {
            license_name: UNKNOWN_LICENSE.to_string(),
            license_url: String::new(),
            homepage: String::new(),
            notes: notes.into(),
        }
    }

    /// Whether the license is the unknown placeholder.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.license_name == UNKNOWN_LICENSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_prefix() {
        let lic = LicenseReference::from_declared(Some("expression"), "MIT");
        assert_eq!(lic, LicenseReference::Expression("MIT".to_string()));
        assert_eq!(lic.display_name(), "SPDX: MIT");
    }

    #[test]
    fn test_file_prefix() {
        let lic = LicenseReference::from_declared(Some("file"), "LICENSE");
        assert_eq!(lic.display_name(), "License file: LICENSE");
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let lic = LicenseReference::from_declared(Some("Expression"), "Apache-2.0");
        assert_eq!(lic.display_name(), "SPDX: Apache-2.0");
    }

    #[test]
    fn test_untyped_value_is_kept_verbatim() {
        let lic = LicenseReference::from_declared(None, "  BSD  ");
        assert_eq!(lic.display_name(), "BSD");
        let lic = LicenseReference::from_declared(Some("other"), "Custom");
        assert_eq!(lic.display_name(), "Custom");
    }

    #[test]
    fn test_empty_value_is_unknown() {
        let lic = LicenseReference::from_declared(Some("expression"), "   ");
        assert_eq!(lic, LicenseReference::None);
        assert_eq!(lic.display_name(), UNKNOWN_LICENSE);
    }

    #[test]
    fn test_unknown_metadata() {
        let meta = LicenseMetadata::unknown("offline");
        assert!(meta.is_unknown());
        assert!(meta.license_url.is_empty());
        assert!(meta.homepage.is_empty());
        assert_eq!(meta.notes, "offline");
    }
}

//! Component, package reference and the ordered component set.

use super::LicenseMetadata;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Version string used for every vendored component.
pub const BUNDLED_VERSION: &str = "bundled";

/// Where a component comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Package resolved from the NuGet registry
    NuGet,
    /// Code vendored into the repository
    Bundled,
}

impl SourceKind {
    /// Label used in reports and file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NuGet => "NuGet",
            Self::Bundled => "Bundled",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Reports order sources by their label, not by declaration order.
impl Ord for SourceKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for SourceKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A dependency declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    pub version: String,
}

impl PackageRef {
    /// Build a reference from raw manifest values.
    ///
    /// Returns `None` when either value is blank after trimming.
    #[must_use]
    pub fn new(name: &str, version: &str) -> Option<Self> {
        let name = name.trim();
        let version = version.trim();
        if name.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    fn sort_key(&self) -> (String, &str, &str) {
        (self.name.to_lowercase(), &self.version, &self.name)
    }
}

impl Ord for PackageRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for PackageRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// One third-party or bundled unit of code whose license must be disclosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub version: String,
    pub source: SourceKind,
    pub license: LicenseMetadata,
    /// License file found next to a bundled component, embedded verbatim
    /// in its license record
    pub bundled_license_file: Option<PathBuf>,
}

impl Component {
    /// Build a registry component from its reference and fetched metadata.
    #[must_use]
    pub fn from_registry(package: PackageRef, license: LicenseMetadata) -> Self {
        Self {
            name: package.name,
            version: package.version,
            source: SourceKind::NuGet,
            license,
            bundled_license_file: None,
        }
    }

    /// Build a vendored component.
    pub fn bundled(
        name: impl Into<String>,
        license: LicenseMetadata,
        license_file: Option<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: BUNDLED_VERSION.to_string(),
            source: SourceKind::Bundled,
            license,
            bundled_license_file: license_file,
        }
    }

    /// Sort key: (source, lowercase name, version, exact name).
    ///
    /// The exact name breaks ties between names differing only by case, so
    /// two keys are equal exactly when the identities are equal.
    #[must_use]
    pub fn key(&self) -> ComponentKey {
        ComponentKey {
            source: self.source,
            name_lower: self.name.to_lowercase(),
            version: self.version.clone(),
            name: self.name.clone(),
        }
    }

    /// Identity string, stable across runs.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}/{}/{}", self.source, self.name, self.version)
    }
}

/// Ordering and identity key for a [`Component`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey {
    pub source: SourceKind,
    pub name_lower: String,
    pub version: String,
    pub name: String,
}

/// Components keyed on identity, iterated in report order.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    components: BTreeMap<ComponentKey, Component>,
}

impl ComponentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component. Returns `false` if its identity was already present;
    /// the first inserted component wins.
    pub fn insert(&mut self, component: Component) -> bool {
        let key = component.key();
        if self.components.contains_key(&key) {
            tracing::debug!("Duplicate component {} ignored", component.identity());
            return false;
        }
        self.components.insert(key, component);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate in (source, lowercase name, version) order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Number of components carrying the unknown placeholder.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.iter().filter(|c| c.license.is_unknown()).count()
    }

    /// Number of components of the given source kind.
    #[must_use]
    pub fn count_source(&self, source: SourceKind) -> usize {
        self.iter().filter(|c| c.source == source).count()
    }
}

impl FromIterator<Component> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut set = Self::new();
        for component in iter {
            set.insert(component);
        }
        set
    }
}

impl Extend<Component> for ComponentSet {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        for component in iter {
            self.insert(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuget(name: &str, version: &str) -> Component {
        Component::from_registry(
            PackageRef::new(name, version).expect("valid ref"),
            LicenseMetadata::unknown(""),
        )
    }

    #[test]
    fn test_package_ref_rejects_blank() {
        assert!(PackageRef::new("  ", "1.0").is_none());
        assert!(PackageRef::new("Foo", "").is_none());
        let r = PackageRef::new(" Foo ", " 1.0 ").expect("valid");
        assert_eq!(r.name, "Foo");
        assert_eq!(r.version, "1.0");
    }

    #[test]
    fn test_package_ref_order_is_case_insensitive() {
        let mut refs = vec![
            PackageRef::new("zeta", "1.0").unwrap(),
            PackageRef::new("Alpha", "2.0").unwrap(),
            PackageRef::new("alpha", "1.0").unwrap(),
        ];
        refs.sort();
        let names: Vec<_> = refs.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["alpha@1.0", "Alpha@2.0", "zeta@1.0"]);
    }

    #[test]
    fn test_source_kind_orders_by_label() {
        assert!(SourceKind::Bundled < SourceKind::NuGet);
    }

    #[test]
    fn test_set_deduplicates_identity() {
        let mut set = ComponentSet::new();
        assert!(set.insert(nuget("Foo", "1.0")));
        assert!(!set.insert(nuget("Foo", "1.0")));
        assert!(set.insert(nuget("foo", "1.0")));
        assert!(set.insert(nuget("Foo", "2.0")));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_set_iteration_order() {
        let set: ComponentSet = vec![
            nuget("Zed", "1.0"),
            Component::bundled("zlib", LicenseMetadata::unknown(""), None),
            nuget("abc", "2.0"),
            nuget("ABC", "1.0"),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = set.iter().map(Component::identity).collect();
        assert_eq!(
            order,
            vec![
                "Bundled/zlib/bundled",
                "NuGet/ABC/1.0",
                "NuGet/abc/2.0",
                "NuGet/Zed/1.0",
            ]
        );
        assert_eq!(set.count_source(SourceKind::NuGet), 3);
        assert_eq!(set.unknown_count(), 4);
    }
}

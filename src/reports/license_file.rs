//! Per-component license records.

use crate::error::{NoticeError, Result};
use crate::model::{Component, ComponentSet};
use crate::utils::content_hash;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Separator placed above embedded bundled license text.
pub const BUNDLED_TEXT_SEPARATOR: &str = "----- Bundled license text -----";

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("static regex"));

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// # Examples
///
/// ```
/// use notice_gen::reports::safe_file_name;
///
/// assert_eq!(safe_file_name("My/Package@2.0"), "My_Package_2.0");
/// ```
#[must_use]
pub fn safe_file_name(value: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(value, "_").into_owned()
}

/// File name of a component's record before collision handling:
/// `<source>_<safe name>_<safe version>`.
fn base_name(component: &Component) -> String {
    format!(
        "{}_{}_{}",
        component.source,
        safe_file_name(&component.name),
        safe_file_name(&component.version)
    )
}

/// Hex digest of the component identity.
fn identity_hex(component: &Component) -> String {
    format!("{:016x}", content_hash(component.identity().as_bytes()))
}

/// Assign a record file name to every component, in set order.
///
/// Distinct identities can sanitize to the same name (`A/B` and `A@B`), and
/// names differing only in case clash on case-insensitive filesystems. Every
/// component involved in such a clash gets an identity-hash suffix; all
/// other names stay in their plain form. A suffixed name never reuses
/// another component's plain name or an earlier suffixed name.
#[must_use]
pub fn plan_file_names(components: &ComponentSet) -> Vec<(&Component, String)> {
    let bases: Vec<(&Component, String)> = components.iter().map(|c| (c, base_name(c))).collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, base) in &bases {
        *counts.entry(base.to_ascii_lowercase()).or_default() += 1;
    }

    let mut suffixed: HashSet<String> = HashSet::new();
    bases
        .into_iter()
        .map(|(component, base)| {
            let clashes = counts
                .get(&base.to_ascii_lowercase())
                .is_some_and(|&n| n > 1);
            if !clashes {
                return (component, format!("{base}.txt"));
            }

            let stem = disambiguate(component, &base, |candidate| {
                let key = candidate.to_ascii_lowercase();
                !counts.contains_key(&key) && !suffixed.contains(&key)
            });
            suffixed.insert(stem.to_ascii_lowercase());
            tracing::debug!("File name {} is shared; using {}", base, stem);
            (component, format!("{stem}.txt"))
        })
        .collect()
}

/// First free stem among `<base>_<8 hex>`, `<base>_<16 hex>`, then
/// `<base>_<16 hex>_<n>`.
fn disambiguate(component: &Component, base: &str, is_free: impl Fn(&str) -> bool) -> String {
    let hex = identity_hex(component);
    let short = format!("{base}_{}", &hex[..8]);
    if is_free(&short) {
        return short;
    }
    let long = format!("{base}_{hex}");
    if is_free(&long) {
        return long;
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{long}_{n}");
        if is_free(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Render the text record for one component.
///
/// Bundled components with a detected license file get the file embedded
/// verbatim (invalid UTF-8 is replaced, not rejected).
pub fn render_license_record(component: &Component) -> Result<String> {
    let license = &component.license;
    let mut lines = vec![
        format!("Component: {}", component.name),
        format!("Version: {}", component.version),
        format!("Source: {}", component.source),
        format!("License: {}", license.license_name),
        format!("License URL: {}", or_na(&license.license_url)),
        format!("Homepage: {}", or_na(&license.homepage)),
        String::new(),
    ];

    if !license.notes.is_empty() {
        lines.push(format!("Notes: {}", license.notes));
    }

    if let Some(path) = &component.bundled_license_file {
        let bytes = std::fs::read(path).map_err(|e| NoticeError::io(path, e))?;
        lines.push(String::new());
        lines.push(BUNDLED_TEXT_SEPARATOR.to_string());
        lines.push(String::new());
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    let mut record = lines.join("\n").trim_end().to_string();
    record.push('\n');
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LicenseMetadata, PackageRef};
    use tempfile::TempDir;

    fn nuget(name: &str, version: &str, license: LicenseMetadata) -> Component {
        Component::from_registry(PackageRef::new(name, version).unwrap(), license)
    }

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("Newtonsoft.Json"), "Newtonsoft.Json");
        assert_eq!(safe_file_name("a b+c"), "a_b_c");
        assert_eq!(safe_file_name("1.0.0-beta_2"), "1.0.0-beta_2");
        assert_eq!(safe_file_name("é"), "_");
    }

    #[test]
    fn test_record_layout() {
        let component = nuget(
            "Serilog",
            "3.1.1",
            LicenseMetadata {
                license_name: "SPDX: Apache-2.0".to_string(),
                license_url: "https://licenses.nuget.org/Apache-2.0".to_string(),
                homepage: String::new(),
                notes: String::new(),
            },
        );
        let record = render_license_record(&component).unwrap();
        assert_eq!(
            record,
            "Component: Serilog\n\
             Version: 3.1.1\n\
             Source: NuGet\n\
             License: SPDX: Apache-2.0\n\
             License URL: https://licenses.nuget.org/Apache-2.0\n\
             Homepage: N/A\n"
        );
    }

    #[test]
    fn test_record_with_notes() {
        let component = nuget("Foo", "1.0", LicenseMetadata::unknown("Could not fetch."));
        let record = render_license_record(&component).unwrap();
        assert!(record.ends_with("Homepage: N/A\n\nNotes: Could not fetch.\n"));
        assert!(record.contains("License URL: N/A\n"));
    }

    #[test]
    fn test_bundled_text_embedded() {
        let tmp = TempDir::new().unwrap();
        let license_path = tmp.path().join("LICENSE");
        std::fs::write(&license_path, "Copyright (c) zlib authors\n\n").unwrap();

        let component = Component::bundled(
            "zlib",
            LicenseMetadata {
                license_name: "See bundled files".to_string(),
                notes: "License file copied from bundled component.".to_string(),
                ..LicenseMetadata::default()
            },
            Some(license_path),
        );
        let record = render_license_record(&component).unwrap();
        assert!(record.ends_with(
            "Notes: License file copied from bundled component.\n\n\
             ----- Bundled license text -----\n\n\
             Copyright (c) zlib authors\n"
        ));
    }

    #[test]
    fn test_plain_names_without_collision() {
        let set: ComponentSet = vec![nuget("My/Package", "2.0", LicenseMetadata::unknown(""))]
            .into_iter()
            .collect();
        let planned = plan_file_names(&set);
        assert_eq!(planned[0].1, "NuGet_My_Package_2.0.txt");
    }

    #[test]
    fn test_collisions_get_distinct_suffixes() {
        let set: ComponentSet = vec![
            nuget("My/Package", "2.0", LicenseMetadata::unknown("")),
            nuget("My@Package", "2.0", LicenseMetadata::unknown("")),
            nuget("Other", "1.0", LicenseMetadata::unknown("")),
        ]
        .into_iter()
        .collect();

        let planned = plan_file_names(&set);
        let names: Vec<&str> = planned.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[1]);
        for name in &names[..2] {
            assert!(name.starts_with("NuGet_My_Package_2.0_"), "{name}");
            assert_eq!(name.len(), "NuGet_My_Package_2.0_".len() + 8 + ".txt".len());
        }
        assert_eq!(names[2], "NuGet_Other_1.0.txt");

        // Stable across runs
        let again = plan_file_names(&set);
        assert_eq!(planned, again);
    }

    #[test]
    fn test_case_only_difference_is_suffixed() {
        let set: ComponentSet = vec![
            nuget("foo", "1.0", LicenseMetadata::unknown("")),
            nuget("Foo", "1.0", LicenseMetadata::unknown("")),
        ]
        .into_iter()
        .collect();
        let planned = plan_file_names(&set);
        assert_ne!(
            planned[0].1.to_ascii_lowercase(),
            planned[1].1.to_ascii_lowercase()
        );
    }

    #[test]
    fn test_suffix_never_reuses_a_plain_name() {
        let slash = nuget("A/B", "1.0", LicenseMetadata::unknown(""));
        let hex = identity_hex(&slash);
        // Sanitizes to exactly the short suffixed name of `A/B`.
        let lookalike = nuget("A_B", &format!("1.0_{}", &hex[..8]), LicenseMetadata::unknown(""));
        let set: ComponentSet = vec![
            slash,
            nuget("A@B", "1.0", LicenseMetadata::unknown("")),
            lookalike,
        ]
        .into_iter()
        .collect();

        let planned = plan_file_names(&set);
        let by_name: HashMap<&str, &str> = planned
            .iter()
            .map(|(c, file)| (c.name.as_str(), file.as_str()))
            .collect();

        assert_eq!(by_name["A_B"], format!("NuGet_A_B_1.0_{}.txt", &hex[..8]));
        assert_eq!(by_name["A/B"], format!("NuGet_A_B_1.0_{hex}.txt"));

        let unique: HashSet<String> = planned
            .iter()
            .map(|(_, file)| file.to_ascii_lowercase())
            .collect();
        assert_eq!(unique.len(), planned.len());
    }
}

//! Aggregate `THIRD_PARTY_NOTICES.md` document.

use super::escape::escape_markdown_table;
use crate::model::ComponentSet;

/// Render the aggregate notices document.
///
/// `licenses_label` is the licenses directory as it should appear in the
/// pointer line, e.g. `LICENSES`.
#[must_use]
pub fn render_notices(components: &ComponentSet, licenses_label: &str) -> String {
    let mut lines = vec![
        "# THIRD_PARTY_NOTICES".to_string(),
        String::new(),
        "This file is generated by `notice-gen generate`.".to_string(),
        String::new(),
        "## Included third-party components".to_string(),
        String::new(),
        "| Source | Name | Version | License | License URL |".to_string(),
        "|---|---|---|---|---|".to_string(),
    ];

    for component in components.iter() {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            component.source,
            escape_markdown_table(&component.name),
            escape_markdown_table(&component.version),
            escape_markdown_table(&component.license.license_name),
            escape_markdown_table(&component.license.license_url),
        ));
    }

    lines.extend([
        String::new(),
        "## Per-component license files".to_string(),
        String::new(),
        format!("Detailed records are written to the `{licenses_label}/` directory."),
    ]);

    let mut document = lines.join("\n").trim_end().to_string();
    document.push('\n');
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, LicenseMetadata, PackageRef};

    #[test]
    fn test_empty_set_renders_header_only() {
        let doc = render_notices(&ComponentSet::new(), "LICENSES");
        assert_eq!(
            doc,
            "# THIRD_PARTY_NOTICES\n\
             \n\
             This file is generated by `notice-gen generate`.\n\
             \n\
             ## Included third-party components\n\
             \n\
             | Source | Name | Version | License | License URL |\n\
             |---|---|---|---|---|\n\
             \n\
             ## Per-component license files\n\
             \n\
             Detailed records are written to the `LICENSES/` directory.\n"
        );
    }

    #[test]
    fn test_rows_in_set_order_and_escaped() {
        let set: ComponentSet = vec![
            Component::from_registry(
                PackageRef::new("Pipe|Name", "1.0").unwrap(),
                LicenseMetadata {
                    license_name: "SPDX: MIT".to_string(),
                    license_url: "https://licenses.nuget.org/MIT".to_string(),
                    ..LicenseMetadata::default()
                },
            ),
            Component::bundled("zlib", LicenseMetadata::unknown("none"), None),
        ]
        .into_iter()
        .collect();

        let doc = render_notices(&set, "docs/licenses");
        let rows: Vec<&str> = doc.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| Source")).collect();
        assert_eq!(
            rows,
            vec![
                "| Bundled | zlib | bundled | UNKNOWN |  |",
                "| NuGet | Pipe\\|Name | 1.0 | SPDX: MIT | https://licenses.nuget.org/MIT |",
            ]
        );
        assert!(doc.contains("Detailed records are written to the `docs/licenses/` directory."));
    }
}

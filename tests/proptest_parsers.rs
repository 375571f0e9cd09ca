//! Property-based tests for the manifest and nuspec parsers.
//!
//! Ensures parsers don't panic on arbitrary input, and that well-formed
//! references always survive a parse.

use notice_gen::collector::parse_manifest;
use notice_gen::registry::parse_nuspec;
use proptest::prelude::*;

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

proptest! {
    // Parser tests only assert no-panic on random input; most of it is
    // expected to produce Err.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_manifest_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_manifest(&s, "random.csproj");
    }

    #[test]
    fn parse_nuspec_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_nuspec(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[A-Za-z]{1,20}( [A-Za-z]{1,10}="[^"<&]{0,20}")?>[^<]{0,200}</[A-Za-z]{1,20}>"#).unwrap()
    ) {
        let _ = parse_manifest(&s, "fragment.csproj");
        let _ = parse_nuspec(&s);
    }

    #[test]
    fn declared_reference_roundtrips(
        name in "[A-Za-z][A-Za-z0-9._/@&<>\"-]{0,40}",
        version in "[0-9]{1,3}\\.[0-9]{1,3}(\\.[0-9]{1,3})?(-[a-z]{1,8})?",
        as_child in any::<bool>(),
    ) {
        let element = if as_child {
            format!(
                r#"<PackageReference Include="{}"><Version>{}</Version></PackageReference>"#,
                xml_escape(&name),
                version
            )
        } else {
            format!(
                r#"<PackageReference Include="{}" Version="{}" />"#,
                xml_escape(&name),
                version
            )
        };
        let doc = format!("<Project><ItemGroup>{element}</ItemGroup></Project>");

        let refs = parse_manifest(&doc, "generated.csproj").unwrap();
        prop_assert_eq!(refs.len(), 1);
        prop_assert_eq!(&refs[0].name, &name);
        prop_assert_eq!(&refs[0].version, &version);
    }

    #[test]
    fn expression_license_is_prefixed(
        expr in "[A-Za-z0-9.-]{1,20}( (OR|AND) [A-Za-z0-9.-]{1,20})?",
    ) {
        let doc = format!(
            r#"<package><metadata><license type="expression">{expr}</license></metadata></package>"#
        );
        let meta = parse_nuspec(&doc).unwrap();
        prop_assert_eq!(meta.license_name, format!("SPDX: {expr}"));
    }
}

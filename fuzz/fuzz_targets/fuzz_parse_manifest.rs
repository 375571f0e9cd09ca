#![no_main]
use libfuzzer_sys::fuzz_target;
use notice_gen::collector::parse_manifest;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the project manifest parser.
///
/// Also wraps the input in a `Project/ItemGroup` envelope so mutations
/// reach the `PackageReference` handling instead of failing at the root.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_manifest(s, "fuzz.csproj");

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!("<Project><ItemGroup>{s}</ItemGroup></Project>");
            let _ = parse_manifest(&wrapped, "fuzz.csproj");
        }
    }
});

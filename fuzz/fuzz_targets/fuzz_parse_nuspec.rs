#![no_main]
use libfuzzer_sys::fuzz_target;
use notice_gen::registry::parse_nuspec;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the nuspec parser with raw registry responses and with input
/// placed inside a `package/metadata` envelope.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_nuspec(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!("<package><metadata>{s}</metadata></package>");
            let _ = parse_nuspec(&wrapped);
        }
    }
});

#![no_main]

use benchdiff::chart_json::parse_chart_json_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the extractor, only produce errors
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_chart_json_str(input);
    }
});

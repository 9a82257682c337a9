#![no_main]

use libfuzzer_sys::fuzz_target;
use tern_dts::{TranslateOptions, translate_with_options};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Keep inputs small enough to avoid timeouts
    if source.len() > 100_000 {
        return;
    }

    // Both modes must return Ok or Err without panicking, and a document
    // that translated must serialize.
    for full_declarations in [false, true] {
        let options = TranslateOptions { full_declarations };
        if let Ok(doc) = translate_with_options(source, "fuzz", &options) {
            assert!(doc.to_json().is_ok());
        }
    }
});

#![no_main]

//! Fuzz target that verifies repair idempotency:
//! applying the YAML repair pass twice must equal applying it once.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Skip extreme inputs
    if content.is_empty() || content.len() > 50_000 {
        return;
    }

    let once = mdmend_lib::repair_document(content);
    let twice = mdmend_lib::repair_document(&once);

    assert_eq!(once, twice, "Repair is not idempotent");
});

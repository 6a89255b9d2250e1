#![no_main]

//! Fuzz target for the full pipeline: it must never panic, whatever the
//! input looks like.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    if content.len() > 50_000 {
        return;
    }

    let _ = mdmend_lib::format_code_blocks(content);
});

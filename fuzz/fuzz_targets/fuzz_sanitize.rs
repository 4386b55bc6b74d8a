#![no_main]

use durpick_text::sanitize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // A repaired text never needs repair again.
    if let Some(fixed) = sanitize(text) {
        assert_eq!(sanitize(&fixed), None, "{text:?} -> {fixed:?}");
    }
});

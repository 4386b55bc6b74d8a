#![no_main]

use durpick_text::{locate, span_for};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let offset = usize::from(data[0]);
    let Ok(text) = std::str::from_utf8(&data[1..]) else {
        return;
    };
    if text.len() > 1024 {
        return;
    }

    let len = text.chars().count();
    if let Some(hit) = locate(text, offset) {
        assert!(hit.span.start <= hit.span.end && hit.span.end <= len);
        assert_eq!(span_for(text, hit.segment), Some(hit.span));
    }
});

#![no_main]

use durpick_text::{MAX_REPRESENTABLE, decode, encode, is_canonical};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // decode is total.
    let millis = decode(text);

    // Anything below the representable maximum round-trips through encode.
    if millis <= MAX_REPRESENTABLE {
        let canonical = encode(millis);
        assert!(is_canonical(&canonical), "encode produced {canonical:?}");
        assert_eq!(decode(&canonical), millis, "round trip of {text:?}");
    }
});

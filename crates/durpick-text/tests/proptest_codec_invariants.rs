//! Property-based invariant tests for the duration codec and validator.
//!
//! 1. Every in-range value survives encode then decode.
//! 2. Encoder output is strictly canonical and never needs repair.
//! 3. Decode is total and never exceeds what the clock can express.
//! 4. Clamp is idempotent and lands inside ordered bounds.
//! 5. Sanitize reaches a fixpoint in one step.

use durpick_text::{
    Bounds, MAX_REPRESENTABLE, clamp, decode, encode, is_canonical, sanitize,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = u64> {
    prop_oneof![
        0..=MAX_REPRESENTABLE,
        Just(0),
        Just(MAX_REPRESENTABLE),
        (0u64..=98, 0u64..24).prop_map(|(d, h)| d * 86_400_000 + h * 3_600_000),
    ]
}

/// Text shaped roughly like a duration, with noise in each fragment.
fn arb_duration_like() -> impl Strategy<Value = String> {
    let fragment = "[0-9]{0,4}|-[0-9]{1,2}|[a-z ]{0,2}";
    (
        fragment,
        fragment,
        fragment,
        fragment,
        fragment,
        prop::bool::ANY,
    )
        .prop_map(|(d, h, m, s, ms, marker)| {
            if marker {
                format!("{d} | {h}:{m}:{s}.{ms}")
            } else {
                format!("{h}:{m}:{s}")
            }
        })
}

// ── Codec ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn round_trip(value in arb_value()) {
        prop_assert_eq!(decode(&encode(value)), value);
    }

    #[test]
    fn encoded_text_is_canonical(value in arb_value()) {
        let text = encode(value);
        prop_assert!(is_canonical(&text), "{text}");
        prop_assert_eq!(sanitize(&text), None);
    }

    #[test]
    fn decode_is_total(text in ".{0,40}") {
        let _ = decode(&text);
    }

    #[test]
    fn decode_of_clamped_text_round_trips(text in arb_duration_like()) {
        let value = Bounds::default().clamp(decode(&text));
        prop_assert_eq!(decode(&encode(value)), value);
    }
}

// ── Bounds ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn clamp_is_idempotent(x in any::<u64>(), lo in any::<u64>(), hi in any::<u64>()) {
        let once = clamp(x, lo, hi);
        prop_assert_eq!(clamp(once, lo, hi), once);
    }

    #[test]
    fn clamp_respects_ordered_bounds(x in any::<u64>(), a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let clamped = clamp(x, lo, hi);
        prop_assert!(lo <= clamped && clamped <= hi);
    }

    #[test]
    fn bounds_stay_representable(a in any::<u64>(), b in any::<u64>()) {
        let bounds = Bounds::new(a, b);
        prop_assert!(bounds.min() <= MAX_REPRESENTABLE);
        prop_assert!(bounds.max() <= MAX_REPRESENTABLE);
        prop_assert!(bounds.day_width() >= 2);
    }
}

// ── Sanitize ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sanitize_none_is_stable(text in arb_duration_like()) {
        if sanitize(&text).is_none() {
            prop_assert_eq!(sanitize(&text), None);
        }
    }

    #[test]
    fn sanitize_repairs_in_one_step(text in arb_duration_like()) {
        if let Some(fixed) = sanitize(&text) {
            prop_assert_eq!(sanitize(&fixed), None, "{} -> {}", text, fixed);
        }
    }

    #[test]
    fn sanitize_is_total(text in ".{0,40}") {
        if let Some(fixed) = sanitize(&text) {
            prop_assert_eq!(sanitize(&fixed), None);
        }
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn scenario_values() {
    assert_eq!(encode(0), "00 | 00:00:00.000");
    assert_eq!(encode(90_061_001), "01 | 01:01:01.001");
    assert_eq!(decode("00 | 23:59:59.999"), 86_399_999);
    assert_eq!(decode("00 | 12:75:10.000"), 46_750_000);
    assert_eq!(sanitize("12:05").as_deref(), Some("00 | 00:00:00.000"));
}

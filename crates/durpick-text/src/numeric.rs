#![forbid(unsafe_code)]

//! Permissive string-to-number coercion.
//!
//! Field fragments are typed by people, so they arrive padded, empty,
//! signed, or not numeric at all. Coercion never fails: callers that need
//! to tell those cases apart use [`classify`], everyone else uses
//! [`coerce`], which maps anything unusable to `0`.

/// Classification of a text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    /// A non-negative value. Empty and whitespace-only text is `Value(0)`.
    Value(u64),
    /// A `-` sign followed by a non-zero digit run.
    Negative,
    /// Anything else.
    NotANumber,
}

/// Classify `text` after trimming surrounding whitespace.
///
/// An optional leading `+` or `-` is allowed; the remainder must be a
/// non-empty run of ASCII digits. Digit runs too long for `u64` saturate.
#[must_use]
pub fn classify(text: &str) -> Numeric {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Numeric::Value(0);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Numeric::NotANumber;
    }

    let value = digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });

    if negative && value > 0 {
        Numeric::Negative
    } else {
        Numeric::Value(value)
    }
}

/// Coerce `text` to a non-negative integer, defaulting to `0`.
#[must_use]
pub fn coerce(text: &str) -> u64 {
    match classify(text) {
        Numeric::Value(v) => v,
        Numeric::Negative | Numeric::NotANumber => 0,
    }
}

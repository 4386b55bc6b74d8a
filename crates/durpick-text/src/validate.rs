#![forbid(unsafe_code)]

//! Bounds, clamping and tolerant repair.

use crate::codec::{DEFAULT_CANONICAL, DurationParts, MAX_REPRESENTABLE};
use crate::numeric::{Numeric, classify};
use crate::sections::Fragments;
use crate::segment::{MS_PER_DAY, MS_PER_HOUR, Segment};

/// Constrain `value` into `[min, max]`.
///
/// Applied as `min(max(value, min), max)`, so an inverted pair resolves to
/// `max`.
#[inline]
#[must_use]
pub fn clamp(value: u64, min: u64, max: u64) -> u64 {
    value.max(min).min(max)
}

/// The configured range of a field, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: u64,
    max: u64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: MAX_REPRESENTABLE,
        }
    }
}

impl Bounds {
    /// Create bounds, clamping both ends into `[0, MAX_REPRESENTABLE]`.
    ///
    /// The pair is kept in the given order. An inverted pair is not
    /// swapped: [`clamp`](Self::clamp) then resolves every value to `max`,
    /// and [`is_ordered`](Self::is_ordered) reports `false`.
    #[must_use]
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: min.min(MAX_REPRESENTABLE),
            max: max.min(MAX_REPRESENTABLE),
        }
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Whether `min <= max`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Clamp `value` into these bounds.
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: u64) -> u64 {
        clamp(value, self.min, self.max)
    }

    /// Hour digits the maximum allows: 0 below one hour, else 2.
    #[must_use]
    pub const fn hour_width(&self) -> usize {
        if self.max < MS_PER_HOUR { 0 } else { 2 }
    }

    /// Day digits the maximum allows, never fewer than 2.
    #[must_use]
    pub const fn day_width(&self) -> usize {
        let mut days = self.max / MS_PER_DAY;
        let mut digits = 1;
        while days >= 10 {
            days /= 10;
            digits += 1;
        }
        if digits < 2 { 2 } else { digits }
    }
}

/// Repair a possibly malformed field text.
///
/// Returns `None` when no repair is needed. Text that does not split into
/// exactly five fragments resets to [`DEFAULT_CANONICAL`]. Otherwise each
/// fragment is checked in turn:
///
/// - days that are not numeric become `00`;
/// - hours that are not numeric or negative become `00`;
/// - minutes and seconds that are not numeric or negative become `00`,
///   and those above 59 or longer than two characters become `59`;
/// - milliseconds that are not numeric or negative become `000`, and
///   those above 999 or longer than three characters become `999`.
///
/// When anything was repaired the whole text is rewritten zero-padded, so
/// a repaired text never needs repair again.
#[must_use]
pub fn sanitize(text: &str) -> Option<String> {
    let fragments = Fragments::split(text);
    if !fragments.is_complete() {
        tracing::debug!(
            reason = "malformed",
            fragments = fragments.count(),
            text_len = text.len(),
            "Duration text reset to default"
        );
        return Some(DEFAULT_CANONICAL.to_owned());
    }

    let mut repaired = false;
    let mut component = |segment: Segment| -> u64 {
        let fragment = fragments.get(segment).unwrap_or("");
        let (value, fixed) = repair(segment, fragment);
        if fixed {
            tracing::debug!(
                reason = "repaired",
                %segment,
                text_len = text.len(),
                "Duration segment repaired"
            );
            repaired = true;
        }
        value
    };

    let parts = DurationParts {
        days: component(Segment::Days),
        hours: component(Segment::Hours),
        minutes: component(Segment::Minutes),
        seconds: component(Segment::Seconds),
        millis: component(Segment::Milliseconds),
    };

    repaired.then(|| parts.to_string())
}

/// Coerce one fragment, reporting whether a repair rule fired.
fn repair(segment: Segment, fragment: &str) -> (u64, bool) {
    let class = classify(fragment);
    let (ceiling, max_len) = match segment {
        Segment::Days => {
            return match class {
                Numeric::Value(v) => (v, false),
                Numeric::Negative => (0, false),
                Numeric::NotANumber => (0, true),
            };
        }
        Segment::Hours => {
            return match class {
                Numeric::Value(v) => (v, false),
                Numeric::Negative | Numeric::NotANumber => (0, true),
            };
        }
        Segment::Minutes | Segment::Seconds => (59, 2),
        Segment::Milliseconds => (999, 3),
    };

    let overlong = fragment.chars().count() > max_len;
    match class {
        Numeric::Value(v) if v > ceiling || overlong => (ceiling, true),
        Numeric::Value(v) => (v, false),
        Numeric::Negative | Numeric::NotANumber => (0, true),
    }
}

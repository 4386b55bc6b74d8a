#![forbid(unsafe_code)]

//! Duration codec: milliseconds to `DD | HH:MM:SS.mmm` and back.
//!
//! [`encode`] is exact for every value up to [`MAX_REPRESENTABLE`] and
//! [`decode`] is total: any text yields some non-negative count. The pair
//! round-trips for every in-range value.

use std::fmt;

use crate::numeric::coerce;
use crate::sections::DAY_SEPARATOR;
use crate::segment::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Largest value the field accepts by default (`98 | 23:59:59.999`).
pub const MAX_REPRESENTABLE: u64 = 8_553_599_999;

/// The canonical rendering of zero, also the reset target for text that
/// cannot be repaired.
pub const DEFAULT_CANONICAL: &str = "00 | 00:00:00.000";

const MINUTE_CEILING: u64 = 59;
const SECOND_CEILING: u64 = 59;
const MILLI_CEILING: u64 = 999;

/// A duration split into its five components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DurationParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl DurationParts {
    /// Decompose by successive division and remainder.
    #[must_use]
    pub const fn from_millis(value: u64) -> Self {
        let days = value / MS_PER_DAY;
        let rest = value % MS_PER_DAY;
        let hours = rest / MS_PER_HOUR;
        let rest = rest % MS_PER_HOUR;
        let minutes = rest / MS_PER_MINUTE;
        let rest = rest % MS_PER_MINUTE;
        let seconds = rest / MS_PER_SECOND;
        let millis = rest % MS_PER_SECOND;
        Self {
            days,
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Recombine into milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub const fn to_millis(self) -> u64 {
        self.days
            .saturating_mul(MS_PER_DAY)
            .saturating_add(self.hours.saturating_mul(MS_PER_HOUR))
            .saturating_add(self.minutes.saturating_mul(MS_PER_MINUTE))
            .saturating_add(self.seconds.saturating_mul(MS_PER_SECOND))
            .saturating_add(self.millis)
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{DAY_SEPARATOR}{:02}:{:02}:{:02}.{:03}",
            self.days, self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Render `value` as a canonical string.
///
/// Callers clamp first; values beyond [`MAX_REPRESENTABLE`] still encode,
/// with a wider day field.
#[must_use]
pub fn encode(value: u64) -> String {
    DurationParts::from_millis(value).to_string()
}

/// Tolerant parse of a duration string.
///
/// Text without any `:` is zero. The day count is whatever precedes the
/// first `" | "` (no marker means no days). The clock part splits on `:`
/// into hours, minutes and seconds; the text after its first `.` is the
/// millisecond count. Minutes and seconds are capped at 59 and
/// milliseconds at 999 before summing. Unparseable components count as 0.
#[must_use]
pub fn decode(text: &str) -> u64 {
    if !text.contains(':') {
        return 0;
    }

    let (days, rest) = match text.split_once(DAY_SEPARATOR) {
        Some((days, rest)) => (days, rest),
        None => ("", text),
    };
    let rest = rest
        .split_once(DAY_SEPARATOR)
        .map_or(rest, |(head, _)| head);
    let (clock, millis) = rest.split_once('.').unwrap_or((rest, ""));

    let mut clock_parts = clock.split(':');
    let hours = clock_parts.next().unwrap_or("");
    let Some(minutes) = clock_parts.next() else {
        return 0;
    };
    let seconds = clock_parts.next().unwrap_or("");

    DurationParts {
        days: coerce(days),
        hours: coerce(hours),
        minutes: coerce(minutes).min(MINUTE_CEILING),
        seconds: coerce(seconds).min(SECOND_CEILING),
        millis: coerce(millis).min(MILLI_CEILING),
    }
    .to_millis()
}

/// Whether `text` is strictly canonical: `D+ | HH:MM:SS.mmm` with minutes
/// and seconds in `00..=59`.
#[must_use]
pub fn is_canonical(text: &str) -> bool {
    let Some((days, rest)) = text.split_once(DAY_SEPARATOR) else {
        return false;
    };
    let Some((clock, millis)) = rest.split_once('.') else {
        return false;
    };
    let mut parts = clock.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    all_digits(days, 1..=usize::MAX)
        && all_digits(hours, 2..=2)
        && is_sexagesimal(minutes)
        && is_sexagesimal(seconds)
        && all_digits(millis, 3..=3)
}

/// Whether `text` is the older clock-only form `H:MM:SS` (one to nine hour
/// digits, minutes and seconds `00..=59`).
#[must_use]
pub fn is_legacy_clock(text: &str) -> bool {
    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    all_digits(hours, 1..=9) && is_sexagesimal(minutes) && is_sexagesimal(seconds)
}

fn all_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_sexagesimal(text: &str) -> bool {
    matches!(text.as_bytes(), [b'0'..=b'5', b'0'..=b'9'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_zero() {
        assert_eq!(encode(0), DEFAULT_CANONICAL);
    }

    #[test]
    fn encode_one_of_each() {
        assert_eq!(encode(90_061_001), "01 | 01:01:01.001");
    }

    #[test]
    fn encode_max() {
        assert_eq!(encode(MAX_REPRESENTABLE), "98 | 23:59:59.999");
    }

    #[test]
    fn encode_wide_days() {
        assert_eq!(encode(100 * MS_PER_DAY), "100 | 00:00:00.000");
    }

    #[test]
    fn decode_last_millisecond_of_day() {
        assert_eq!(decode("00 | 23:59:59.999"), 86_399_999);
    }

    #[test]
    fn decode_caps_minutes() {
        assert_eq!(decode("00 | 12:75:10.000"), 46_750_000);
    }

    #[test]
    fn decode_caps_seconds_and_millis() {
        assert_eq!(decode("00 | 00:00:99.5000"), 59_999);
    }

    #[test]
    fn decode_without_colon_is_zero() {
        assert_eq!(decode(""), 0);
        assert_eq!(decode("12"), 0);
        assert_eq!(decode("01 | 12"), 0);
    }

    #[test]
    fn decode_without_day_marker_reads_clock() {
        assert_eq!(decode("01:02:03"), MS_PER_HOUR + 2 * MS_PER_MINUTE + 3_000);
    }

    #[test]
    fn decode_garbage_components_are_zero() {
        assert_eq!(decode("xx | ab:05:cd.efg"), 5 * MS_PER_MINUTE);
        assert_eq!(decode("-3 | -1:-1:-1.-1"), 0);
    }

    #[test]
    fn decode_missing_seconds_and_millis() {
        assert_eq!(decode("00 | 01:02"), MS_PER_HOUR + 2 * MS_PER_MINUTE);
    }

    #[test]
    fn decode_ignores_text_after_second_marker() {
        assert_eq!(decode("00 | 00:00:01.000 | 99"), 1_000);
    }

    #[test]
    fn decode_saturates() {
        assert_eq!(decode("99999999999999999999 | 00:00:00.000"), u64::MAX);
    }

    #[test]
    fn hours_are_unbounded_on_decode() {
        assert_eq!(decode("00 | 30:00:00.000"), 30 * MS_PER_HOUR);
    }

    #[test]
    fn canonical_accepts_encoder_output() {
        for value in [0, 1, 90_061_001, MAX_REPRESENTABLE, 100 * MS_PER_DAY] {
            assert!(is_canonical(&encode(value)), "{value}");
        }
    }

    #[test]
    fn canonical_rejects_near_misses() {
        for text in [
            "",
            "00 | 00:00:00",
            "00 | 0:00:00.000",
            "00 | 00:60:00.000",
            "00 | 00:00:00.00",
            "00|00:00:00.000",
            " | 00:00:00.000",
            "00 | 00:00:00:00.000",
            "0a | 00:00:00.000",
        ] {
            assert!(!is_canonical(text), "{text:?}");
        }
    }

    #[test]
    fn legacy_clock_form() {
        assert!(is_legacy_clock("1:00:00"));
        assert!(is_legacy_clock("123456789:59:59"));
        assert!(!is_legacy_clock("1234567890:00:00"));
        assert!(!is_legacy_clock("1:60:00"));
        assert!(!is_legacy_clock("1:0:00"));
        assert!(!is_legacy_clock("00 | 01:00:00.000"));
    }

    #[test]
    fn parts_round_trip() {
        let parts = DurationParts::from_millis(90_061_001);
        assert_eq!(
            parts,
            DurationParts {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1,
                millis: 1,
            }
        );
        assert_eq!(parts.to_millis(), 90_061_001);
    }
}

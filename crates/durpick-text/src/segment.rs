#![forbid(unsafe_code)]

//! The five logical segments of a duration field.

use std::fmt;

/// Milliseconds in one day.
pub const MS_PER_DAY: u64 = 86_400_000;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: u64 = 3_600_000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u64 = 60_000;
/// Milliseconds in one second.
pub const MS_PER_SECOND: u64 = 1_000;

/// One logical field of the canonical string, ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Segment {
    /// All segments, left to right.
    pub const ALL: [Segment; 5] = [
        Segment::Days,
        Segment::Hours,
        Segment::Minutes,
        Segment::Seconds,
        Segment::Milliseconds,
    ];

    /// The adjustment factor: how many milliseconds one arrow step adds.
    #[must_use]
    pub const fn step_ms(self) -> u64 {
        match self {
            Self::Days => MS_PER_DAY,
            Self::Hours => MS_PER_HOUR,
            Self::Minutes => MS_PER_MINUTE,
            Self::Seconds => MS_PER_SECOND,
            Self::Milliseconds => 1,
        }
    }

    /// Map an arbitrary step size onto the segment it selects.
    ///
    /// Thresholds are inclusive lower bounds, so a persisted factor that is
    /// not one of the five canonical steps still lands on a segment.
    #[must_use]
    pub const fn from_step(step: u64) -> Self {
        if step >= MS_PER_DAY {
            Self::Days
        } else if step >= MS_PER_HOUR {
            Self::Hours
        } else if step >= MS_PER_MINUTE {
            Self::Minutes
        } else if step >= MS_PER_SECOND {
            Self::Seconds
        } else {
            Self::Milliseconds
        }
    }

    /// Position in [`Segment::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The segment one step toward days (saturating).
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Days | Self::Hours => Self::Days,
            Self::Minutes => Self::Hours,
            Self::Seconds => Self::Minutes,
            Self::Milliseconds => Self::Seconds,
        }
    }

    /// The segment one step toward milliseconds (saturating).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Days => Self::Hours,
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds | Self::Milliseconds => Self::Milliseconds,
        }
    }

    /// Lowercase name, as used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

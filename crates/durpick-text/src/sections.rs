#![forbid(unsafe_code)]

//! Segment offsets for the canonical string.
//!
//! Every piece of marker arithmetic lives here. [`sectionize`] splits text
//! into fragments; [`SegmentTable`] turns a well-formed five-fragment split
//! into character offsets, from which both cursor zones (used by
//! [`locate`]) and highlight spans (used by [`span_for`]) are derived.
//!
//! # Zones and spans
//!
//! For `"01 | 01:01:01.001"`:
//!
//! ```text
//!  offset   0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17
//!  text     0 1 _ | _ 0 1 : 0 1 :  0  1  .  0  0  1
//!  zone     D D D H H H H H M M M  S  S  S  m  m  m  m
//!  span     D D       H H   M M    S  S     m  m  m
//! ```
//!
//! Zones partition every cursor offset `0..=len`; a separator belongs to
//! the segment on its right, and the offset just past a segment's last
//! digit belongs to that segment. Spans cover digits only.

use std::ops::Range;

use smallvec::SmallVec;

use crate::segment::Segment;

/// Separator between the day count and the clock.
pub const DAY_SEPARATOR: &str = " | ";

const DAY_SEPARATOR_CHARS: usize = 3;

/// The fragments of a (possibly malformed) field text.
///
/// Without a [`DAY_SEPARATOR`] the whole text is a single fragment. With
/// one, the fragments are the day text, each `:`-separated clock part up to
/// the first `.`, and the text after that `.` (empty when there is none).
/// Only the text up to a second separator takes part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragments<'a> {
    parts: SmallVec<[&'a str; 5]>,
}

impl<'a> Fragments<'a> {
    /// Split `text` into fragments.
    #[must_use]
    pub fn split(text: &'a str) -> Self {
        let mut parts = SmallVec::new();
        let Some((days, rest)) = text.split_once(DAY_SEPARATOR) else {
            parts.push(text);
            return Self { parts };
        };
        let rest = rest
            .split_once(DAY_SEPARATOR)
            .map_or(rest, |(head, _)| head);
        let (clock, millis) = rest.split_once('.').unwrap_or((rest, ""));

        parts.push(days);
        parts.extend(clock.split(':'));
        parts.push(millis);
        Self { parts }
    }

    /// Number of fragments.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.parts.len()
    }

    /// Whether the split has the five-fragment shape of a duration.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.parts.len() == Segment::ALL.len()
    }

    /// All fragments in order.
    #[must_use]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.parts
    }

    /// The fragment for `segment`, if the split is complete.
    #[must_use]
    pub fn get(&self, segment: Segment) -> Option<&'a str> {
        if self.is_complete() {
            Some(self.parts[segment.index()])
        } else {
            None
        }
    }
}

/// Split `text` into its fragments. See [`Fragments::split`].
#[must_use]
pub fn sectionize(text: &str) -> Fragments<'_> {
    Fragments::split(text)
}

/// Character offsets of the separators in a five-fragment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTable {
    /// Offset of the `" | "` separator.
    day: usize,
    /// Offset of the `:` after the hours.
    hour: usize,
    /// Offset of the `:` after the minutes.
    minute: usize,
    /// Offset of the `.` after the seconds.
    dot: usize,
    /// Character length of the millisecond fragment.
    millis_len: usize,
    /// Character length of the whole text.
    len: usize,
}

impl SegmentTable {
    /// Build the table for `text`, or `None` when the text does not split
    /// into exactly five fragments with a `.` before the milliseconds.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let fragments = Fragments::split(text);
        if !fragments.is_complete() {
            return None;
        }
        let [days, hours, minutes, seconds, millis] = fragments.as_slice() else {
            return None;
        };

        let day = chars(days);
        let hour = day + DAY_SEPARATOR_CHARS + chars(hours);
        let minute = hour + 1 + chars(minutes);
        let dot = minute + 1 + chars(seconds);
        let len = text.chars().count();
        if dot >= len {
            return None;
        }

        Some(Self {
            day,
            hour,
            minute,
            dot,
            millis_len: chars(millis),
            len,
        })
    }

    /// Character length of the text this table was built from.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a parsed table has at least the separators.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The cursor offsets that select `segment`.
    #[must_use]
    pub const fn zone(&self, segment: Segment) -> Range<usize> {
        match segment {
            Segment::Days => 0..self.day + 1,
            Segment::Hours => self.day + 1..self.hour + 1,
            Segment::Minutes => self.hour + 1..self.minute + 1,
            Segment::Seconds => self.minute + 1..self.dot + 1,
            Segment::Milliseconds => self.dot + 1..self.len + 1,
        }
    }

    /// The digits owned by `segment`.
    #[must_use]
    pub const fn span(&self, segment: Segment) -> Range<usize> {
        match segment {
            Segment::Days => 0..self.day,
            Segment::Hours => self.day + DAY_SEPARATOR_CHARS..self.hour,
            Segment::Minutes => self.hour + 1..self.minute,
            Segment::Seconds => self.minute + 1..self.dot,
            Segment::Milliseconds => self.dot + 1..self.dot + 1 + self.millis_len,
        }
    }

    /// Character length of `segment`'s fragment.
    #[must_use]
    pub const fn fragment_len(&self, segment: Segment) -> usize {
        let span = self.span(segment);
        span.end - span.start
    }

    /// The segment whose zone contains `offset`.
    #[must_use]
    pub fn segment_at(&self, offset: usize) -> Option<Segment> {
        if offset > self.len {
            return None;
        }
        Segment::ALL
            .into_iter()
            .find(|&segment| self.zone(segment).contains(&offset))
    }
}

/// A cursor offset resolved to a segment and its highlight span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub segment: Segment,
    pub span: Range<usize>,
}

/// Resolve the segment under `offset`.
///
/// `None` means the format is not recognized (or the offset lies past the
/// end); callers treat that as "no highlighting action".
#[must_use]
pub fn locate(text: &str, offset: usize) -> Option<Located> {
    let table = SegmentTable::parse(text)?;
    let segment = table.segment_at(offset)?;
    Some(Located {
        segment,
        span: table.span(segment),
    })
}

/// The character range owned by `segment` in `text`.
#[must_use]
pub fn span_for(text: &str, segment: Segment) -> Option<Range<usize>> {
    SegmentTable::parse(text).map(|table| table.span(segment))
}

fn chars(text: &str) -> usize {
    text.chars().count()
}

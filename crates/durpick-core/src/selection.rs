#![forbid(unsafe_code)]

//! Half-open character selections.
//!
//! A [`Selection`] is the `[start, end)` range a field highlights. Offsets
//! are character offsets into the field text, never byte offsets. A
//! collapsed selection (`start == end`) is a caret.

use std::ops::Range;

/// A half-open `[start, end)` character range over a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// First selected character offset.
    pub start: usize,
    /// One past the last selected character offset.
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing reversed endpoints.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection (caret) at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Number of selected characters.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the selection is a caret.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this selection lies entirely within `range`.
    ///
    /// A caret at `range.end` counts as inside.
    #[must_use]
    pub fn is_within(&self, range: &Range<usize>) -> bool {
        self.start >= range.start && self.end <= range.end
    }

    /// Clamp both endpoints to `len` characters.
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// The selection as a standard range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_reversed_endpoints() {
        assert_eq!(Selection::new(7, 3), Selection { start: 3, end: 7 });
    }

    #[test]
    fn caret_is_empty() {
        let caret = Selection::caret(4);
        assert!(caret.is_empty());
        assert_eq!(caret.len(), 0);
    }

    #[test]
    fn within_includes_caret_at_end() {
        let span = 5..7;
        assert!(Selection::new(5, 7).is_within(&span));
        assert!(Selection::caret(7).is_within(&span));
        assert!(!Selection::new(4, 7).is_within(&span));
        assert!(!Selection::new(5, 8).is_within(&span));
    }

    #[test]
    fn clamp_to_shrinks_past_end() {
        assert_eq!(Selection::new(3, 40).clamp_to(17), Selection::new(3, 17));
        assert_eq!(Selection::new(30, 40).clamp_to(17), Selection::caret(17));
    }

    #[test]
    fn from_range() {
        assert_eq!(Selection::from(5..7), Selection::new(5, 7));
    }
}

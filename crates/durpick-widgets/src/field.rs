#![forbid(unsafe_code)]

//! Decision functions for a duration field.
//!
//! Each function takes the field's current [`FieldState`] (text, selection,
//! active segment) plus its [`FieldSettings`] and returns an [`Outcome`]:
//! the next state and a [`Response`] describing what the host should do
//! (suppress the key or let it through, notify listeners, release focus).
//! Nothing here mutates shared state or raises an error; every malformed
//! input has a recovery target, recorded in [`Response::recovery`].
//!
//! The active segment doubles as the adjustment factor: an arrow step adds
//! or removes [`Segment::step_ms`] milliseconds.

use std::ops::Range;

use durpick_core::event::{KeyCode, KeyEvent};
use durpick_core::selection::Selection;
use durpick_text::{
    Bounds, Segment, SegmentTable, decode, encode, is_canonical, locate, sanitize, sectionize,
    span_for,
};

/// Static configuration of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSettings {
    /// Accepted range in milliseconds.
    pub bounds: Bounds,
    /// Value written when the text is unusable (already inside `bounds`).
    pub initial: u64,
    /// Segment active before the first interaction.
    pub segment: Segment,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            initial: 0,
            segment: Segment::Hours,
        }
    }
}

impl FieldSettings {
    /// Create settings, clamping `initial` into `bounds`.
    #[must_use]
    pub fn new(bounds: Bounds, initial: u64) -> Self {
        Self {
            bounds,
            initial: bounds.clamp(initial),
            segment: Segment::Hours,
        }
    }

    /// Set the starting segment.
    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = segment;
        self
    }

    /// The canonical rendering of the initial value.
    #[must_use]
    pub fn initial_text(&self) -> String {
        encode(self.bounds.clamp(self.initial))
    }

    /// How many digits a segment may hold while typing.
    ///
    /// Hours fall back to 2 when the maximum leaves no room for hours;
    /// those fields skip past hours as soon as anything is typed there.
    #[must_use]
    pub fn entry_width(&self, segment: Segment) -> usize {
        match segment {
            Segment::Days => self.bounds.day_width(),
            Segment::Hours => match self.bounds.hour_width() {
                0 => 2,
                width => width,
            },
            Segment::Minutes | Segment::Seconds => 2,
            Segment::Milliseconds => 3,
        }
    }

    /// Whether a fragment of `len` characters completes `segment`, so the
    /// highlight should move on.
    fn completes(&self, segment: Segment, len: usize) -> bool {
        match segment {
            Segment::Hours => {
                let width = self.bounds.hour_width();
                width == 0 || len >= width
            }
            Segment::Minutes | Segment::Seconds => len >= 2,
            Segment::Days | Segment::Milliseconds => false,
        }
    }
}

/// Text, selection and active segment of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Current text. Canonical after every operation except mid-typing.
    pub value: String,
    /// Highlighted character range.
    pub selection: Selection,
    /// Active segment; its step size is the adjustment factor.
    pub segment: Segment,
}

impl FieldState {
    /// Initialize a field from host text.
    ///
    /// Text that is not strictly canonical is replaced by the formatted
    /// initial value. Canonical text is clamped into the bounds.
    #[must_use]
    pub fn new(text: &str, settings: &FieldSettings) -> Self {
        let value = if is_canonical(text) {
            encode(settings.bounds.clamp(decode(text)))
        } else {
            settings.initial_text()
        };
        Self {
            value,
            selection: Selection::default(),
            segment: settings.segment,
        }
    }

    /// The current value in milliseconds.
    #[must_use]
    pub fn millis(&self) -> u64 {
        decode(&self.value)
    }

    /// Milliseconds one arrow step adds or removes.
    #[must_use]
    pub const fn adjustment_factor(&self) -> u64 {
        self.segment.step_ms()
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// The highlighted text.
    #[must_use]
    pub fn selected_text(&self) -> &str {
        let range = char_to_byte_range(&self.value, self.selection.range());
        &self.value[range]
    }
}

/// What the host should do with the triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Handled; suppress the default action.
    #[default]
    Consumed,
    /// Refused; suppress the default action, nothing changed.
    Rejected,
    /// Not ours; let the default action run (e.g. Tab leaves the field).
    PassThrough,
}

/// Which local recovery path an operation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Text did not decompose into five segments, or a segment was
    /// repaired.
    MalformedFormat,
    /// The decoded value was clamped into bounds.
    OutOfRange,
    /// The cursor or text did not map to a segment; nothing was
    /// highlighted.
    UnrecognizedSegment,
    /// The keystroke would have broken the segment's width or range.
    RejectedKeystroke,
}

/// The host-facing result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub disposition: Disposition,
    /// The text differs from before the event.
    pub value_changed: bool,
    /// An interactive edit happened; hosts raise their "input" notification.
    pub input: bool,
    /// The field asks to give up focus (Enter).
    pub release_focus: bool,
    /// The first recovery path taken, if any.
    pub recovery: Option<Recovery>,
}

impl Response {
    /// Whether the host should suppress the event's default action.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        !matches!(self.disposition, Disposition::PassThrough)
    }

    /// Fold a follow-up response into this one.
    ///
    /// Notifications accumulate, the first recovery wins, and the
    /// disposition of the triggering event is kept.
    #[must_use]
    pub fn merge(self, later: Response) -> Self {
        Self {
            disposition: self.disposition,
            value_changed: self.value_changed || later.value_changed,
            input: self.input || later.input,
            release_focus: self.release_focus || later.release_focus,
            recovery: self.recovery.or(later.recovery),
        }
    }
}

/// Next state plus response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: FieldState,
    pub response: Response,
}

impl Outcome {
    fn unchanged(state: &FieldState, disposition: Disposition, recovery: Option<Recovery>) -> Self {
        Self {
            state: state.clone(),
            response: Response {
                disposition,
                recovery,
                ..Response::default()
            },
        }
    }

    fn rejected(state: &FieldState, recovery: Recovery) -> Self {
        Self::unchanged(state, Disposition::Rejected, Some(recovery))
    }

    fn pass_through(state: &FieldState) -> Self {
        Self::unchanged(state, Disposition::PassThrough, None)
    }
}

/// In-progress edit that tracks the original text.
struct Edit<'a> {
    original: &'a str,
    state: FieldState,
    response: Response,
}

impl<'a> Edit<'a> {
    fn begin(state: &'a FieldState) -> Self {
        Self {
            original: &state.value,
            state: state.clone(),
            response: Response::default(),
        }
    }

    fn write(&mut self, text: String) {
        self.state.value = text;
        let len = self.state.char_len();
        self.state.selection = self.state.selection.clamp_to(len);
    }

    fn highlight(&mut self, segment: Segment) {
        self.state.segment = segment;
        match span_for(&self.state.value, segment) {
            Some(span) => self.state.selection = span.into(),
            None => self.recover(Recovery::UnrecognizedSegment),
        }
    }

    fn recover(&mut self, recovery: Recovery) {
        self.response.recovery.get_or_insert(recovery);
    }

    /// Decode `text`, clamp into bounds and write the canonical result.
    fn write_clamped(&mut self, text: &str, bounds: &Bounds) {
        let decoded = decode(text);
        let clamped = bounds.clamp(decoded);
        if clamped != decoded {
            self.recover(Recovery::OutOfRange);
        }
        self.write(encode(clamped));
    }

    fn finish(mut self) -> Outcome {
        self.response.value_changed = self.original != self.state.value;
        Outcome {
            state: self.state,
            response: self.response,
        }
    }
}

/// Select `segment`'s span and make it active.
#[must_use]
pub fn highlight(state: &FieldState, segment: Segment) -> Outcome {
    let mut edit = Edit::begin(state);
    edit.highlight(segment);
    edit.finish()
}

/// Focus by click or tap: select the segment under the caret.
///
/// The click position is `state.selection.start`.
#[must_use]
pub fn on_click_focus(state: &FieldState) -> Outcome {
    let mut edit = Edit::begin(state);
    match locate(&state.value, state.selection.start) {
        Some(hit) => {
            edit.state.segment = hit.segment;
            edit.state.selection = hit.span.into();
        }
        None => edit.recover(Recovery::UnrecognizedSegment),
    }
    edit.finish()
}

/// Focus by keyboard (tab-in).
///
/// An empty selection, one wider than the hour field, or a field without
/// hours starts over at days. Otherwise the previous selection stays.
#[must_use]
pub fn on_keyboard_focus(state: &FieldState, settings: &FieldSettings) -> Outcome {
    let hour_width = settings.bounds.hour_width();
    let selection = state.selection;
    let mut edit = Edit::begin(state);
    if selection.is_empty() || selection.len() > hour_width || hour_width == 0 {
        edit.highlight(Segment::Days);
    }
    edit.finish()
}

/// Route a key press.
#[must_use]
pub fn on_keydown(state: &FieldState, settings: &FieldSettings, key: &KeyEvent) -> Outcome {
    if !key.is_press() {
        return Outcome::pass_through(state);
    }

    match key.code {
        KeyCode::Up => step(state, settings, true),
        KeyCode::Down => step(state, settings, false),
        KeyCode::Left => highlight(state, state.segment.prev()),
        KeyCode::Right => highlight(state, state.segment.next()),
        KeyCode::Enter => {
            let mut outcome = commit(state, settings);
            outcome.response.release_focus = true;
            outcome
        }
        KeyCode::BackTab => tab(state, false),
        KeyCode::Tab => tab(state, !key.shift()),
        KeyCode::Backspace => backspace(state, settings),
        _ => match key.digit() {
            Some(digit) => type_digit(state, settings, digit),
            None => Outcome::rejected(state, Recovery::RejectedKeystroke),
        },
    }
}

/// Re-validate after the text changed (typing, deletion, host edit).
///
/// Text with fewer than two fragments is replaced by the initial value.
/// Repairable text is repaired, clamped and rewritten. When the caret's
/// segment is now complete the highlight moves to the next segment.
#[must_use]
pub fn on_input(state: &FieldState, settings: &FieldSettings) -> Outcome {
    let mut edit = Edit::begin(state);

    if sectionize(&state.value).count() < 2 {
        edit.recover(Recovery::MalformedFormat);
        edit.write(settings.initial_text());
        edit.highlight(state.segment);
        return edit.finish();
    }

    let typed_in = SegmentTable::parse(&state.value).and_then(|table| {
        let segment = table.segment_at(state.selection.start)?;
        Some((segment, table.fragment_len(segment)))
    });

    let repaired = sanitize(&state.value);
    if let Some(fixed) = &repaired {
        edit.recover(Recovery::MalformedFormat);
        edit.write_clamped(fixed, &settings.bounds);
    }

    match typed_in {
        Some((segment, len)) if settings.completes(segment, len) => {
            edit.highlight(segment.next());
        }
        _ if repaired.is_some() => edit.highlight(state.segment),
        _ => {}
    }
    edit.finish()
}

/// The host's change notification: normalize the whole value.
#[must_use]
pub fn on_change(state: &FieldState, settings: &FieldSettings) -> Outcome {
    commit(state, settings)
}

/// Repair, clamp and rewrite the full value.
///
/// Empty text falls back to the initial value. Always reports input.
#[must_use]
pub fn commit(state: &FieldState, settings: &FieldSettings) -> Outcome {
    let source = if state.value.trim().is_empty() {
        settings.initial_text()
    } else {
        state.value.clone()
    };

    let mut edit = Edit::begin(state);
    let repaired = sanitize(&source);
    if repaired.is_some() {
        edit.recover(Recovery::MalformedFormat);
    }
    edit.write_clamped(repaired.as_deref().unwrap_or(&source), &settings.bounds);
    edit.response.input = true;
    edit.highlight(state.segment);
    edit.finish()
}

/// Loss of focus: repair and clamp, rewriting only when the canonical
/// form differs. Never reports input.
#[must_use]
pub fn on_blur(state: &FieldState, settings: &FieldSettings) -> Outcome {
    let mut edit = Edit::begin(state);
    let repaired = sanitize(&state.value);
    if repaired.is_some() {
        edit.recover(Recovery::MalformedFormat);
    }

    let decoded = decode(repaired.as_deref().unwrap_or(&state.value));
    let clamped = settings.bounds.clamp(decoded);
    if clamped != decoded {
        edit.recover(Recovery::OutOfRange);
    }
    let canonical = encode(clamped);
    if canonical != state.value {
        edit.write(canonical);
    }
    edit.finish()
}

/// Pasted or dropped text is refused.
#[must_use]
pub fn on_paste(state: &FieldState) -> Outcome {
    Outcome::rejected(state, Recovery::RejectedKeystroke)
}

fn step(state: &FieldState, settings: &FieldSettings, up: bool) -> Outcome {
    let factor = state.adjustment_factor();
    let current = decode(&state.value);
    let moved = if up {
        current.saturating_add(factor)
    } else {
        current.saturating_sub(factor)
    };

    let mut edit = Edit::begin(state);
    let clamped = settings.bounds.clamp(moved);
    if clamped != moved {
        edit.recover(Recovery::OutOfRange);
    }
    edit.write(encode(clamped));
    edit.response.input = true;
    edit.highlight(state.segment);
    edit.finish()
}

fn tab(state: &FieldState, forward: bool) -> Outcome {
    match (forward, state.segment) {
        (true, Segment::Milliseconds) | (false, Segment::Days) => Outcome::pass_through(state),
        (true, segment) => highlight(state, segment.next()),
        (false, segment) => highlight(state, segment.prev()),
    }
}

fn type_digit(state: &FieldState, settings: &FieldSettings, digit: char) -> Outcome {
    let Some(table) = SegmentTable::parse(&state.value) else {
        return Outcome::rejected(state, Recovery::UnrecognizedSegment);
    };

    let segment = state.segment;
    let selection = state.selection;
    if !selection.is_within(&table.span(segment)) {
        return Outcome::rejected(state, Recovery::RejectedKeystroke);
    }

    let selected = selection.len();
    let sexagesimal = matches!(segment, Segment::Minutes | Segment::Seconds);
    if sexagesimal && selected >= 2 && matches!(digit, '6'..='9') {
        return Outcome::rejected(state, Recovery::RejectedKeystroke);
    }
    if table.fragment_len(segment) - selected + 1 > settings.entry_width(segment) {
        return Outcome::rejected(state, Recovery::RejectedKeystroke);
    }

    let mut buf = [0u8; 4];
    let typed = FieldState {
        value: replace_chars(&state.value, selection.range(), digit.encode_utf8(&mut buf)),
        selection: Selection::caret(selection.start + 1),
        segment,
    };
    follow_edit(state, &typed, settings)
}

fn backspace(state: &FieldState, settings: &FieldSettings) -> Outcome {
    let selection = state.selection;
    let doomed = if selection.is_empty() {
        match selection.start.checked_sub(1) {
            Some(start) => start..selection.start,
            None => return Outcome::rejected(state, Recovery::RejectedKeystroke),
        }
    } else {
        selection.range()
    };

    // Separators are not deletable while the text has its full shape.
    if let Some(table) = SegmentTable::parse(&state.value)
        && !Selection::from(doomed.clone()).is_within(&table.span(state.segment))
    {
        return Outcome::rejected(state, Recovery::RejectedKeystroke);
    }

    let edited = FieldState {
        value: replace_chars(&state.value, doomed.clone(), ""),
        selection: Selection::caret(doomed.start),
        segment: state.segment,
    };
    follow_edit(state, &edited, settings)
}

/// Run the input handler after an accepted edit and report it as input.
fn follow_edit(before: &FieldState, edited: &FieldState, settings: &FieldSettings) -> Outcome {
    let mut outcome = on_input(edited, settings);
    outcome.response.input = true;
    outcome.response.value_changed = outcome.state.value != before.value;
    outcome
}

fn replace_chars(text: &str, range: Range<usize>, with: &str) -> String {
    let bytes = char_to_byte_range(text, range);
    let mut out = String::with_capacity(text.len() + with.len());
    out.push_str(&text[..bytes.start]);
    out.push_str(with);
    out.push_str(&text[bytes.end..]);
    out
}

fn char_to_byte_range(text: &str, range: Range<usize>) -> Range<usize> {
    let byte_at = |char_idx: usize| {
        text.char_indices()
            .nth(char_idx)
            .map_or(text.len(), |(byte, _)| byte)
    };
    byte_at(range.start)..byte_at(range.end)
}

#![forbid(unsafe_code)]

//! Duration input widget.
//!
//! [`DurationInput`] owns one field's state and settings and routes
//! canonical [`Event`]s through the decision functions in
//! [`crate::field`]. It adds what a live field needs on top of them: focus
//! tracking, mapping a click column to a character offset, and running
//! blur after Enter releases focus.

use durpick_core::event::{Event, KeyCode, MouseButton, MouseEventKind};
use durpick_core::selection::Selection;
use durpick_text::{Bounds, Segment, encode};

use crate::config::PickerConfig;
use crate::field::{self, Disposition, FieldSettings, FieldState, Outcome, Response};

/// A single-line `DD | HH:MM:SS.mmm` entry field.
#[derive(Debug, Clone)]
pub struct DurationInput {
    /// Text, selection and active segment.
    state: FieldState,
    /// Bounds, initial value, starting segment.
    settings: FieldSettings,
    /// Whether the field has focus (keys are ignored otherwise).
    focused: bool,
    /// Screen column of the first character, for click hit-testing.
    origin_x: u16,
    /// Screen row of the field.
    origin_y: u16,
}

impl Default for DurationInput {
    fn default() -> Self {
        Self::new(FieldSettings::default())
    }
}

impl DurationInput {
    /// Create a field showing the settings' initial value.
    #[must_use]
    pub fn new(settings: FieldSettings) -> Self {
        Self {
            state: FieldState::new("", &settings),
            settings,
            focused: false,
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// Create a field from host attributes.
    #[must_use]
    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(config.resolve())
    }

    // --- Builder methods ---

    /// Start from host text (builder). Non-canonical text shows the
    /// initial value instead.
    #[must_use]
    pub fn with_value(mut self, text: &str) -> Self {
        self.state = FieldState::new(text, &self.settings);
        self
    }

    /// Set the screen position of the first character (builder).
    #[must_use]
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Set focus without running focus handling (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    // --- Accessors ---

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.state.value
    }

    /// Current value in milliseconds.
    #[must_use]
    pub fn millis(&self) -> u64 {
        self.state.millis()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    #[must_use]
    pub fn segment(&self) -> Segment {
        self.state.segment
    }

    /// Milliseconds one arrow step adds or removes.
    #[must_use]
    pub fn adjustment_factor(&self) -> u64 {
        self.state.adjustment_factor()
    }

    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.settings.bounds
    }

    #[must_use]
    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Screen column of the caret (start of the selection).
    #[must_use]
    pub fn cursor_position(&self) -> (u16, u16) {
        let offset = u16::try_from(self.state.selection.start).unwrap_or(u16::MAX);
        (self.origin_x.saturating_add(offset), self.origin_y)
    }

    /// The text split around the selection, for rendering the highlight.
    #[must_use]
    pub fn display_parts(&self) -> (&str, &str, &str) {
        let value = self.state.value.as_str();
        let byte_at = |char_idx: usize| {
            value
                .char_indices()
                .nth(char_idx)
                .map_or(value.len(), |(byte, _)| byte)
        };
        let start = byte_at(self.state.selection.start);
        let end = byte_at(self.state.selection.end);
        (&value[..start], &value[start..end], &value[end..])
    }

    // --- Host writes ---

    /// Replace the text as a host would, then normalize it like a blur.
    ///
    /// Returns whether the stored text changed.
    pub fn set_value(&mut self, text: &str) -> bool {
        let before = self.state.value.clone();
        self.state.value = text.to_owned();
        self.state.selection = self.state.selection.clamp_to(self.state.char_len());
        self.apply(field::on_blur(&self.state, &self.settings));
        self.state.value != before
    }

    /// Set the value in milliseconds, clamped into bounds.
    ///
    /// Returns whether the stored text changed.
    pub fn set_millis(&mut self, value: u64) -> bool {
        self.set_value(&encode(self.settings.bounds.clamp(value)))
    }

    // --- Focus ---

    /// Gain focus from the keyboard (tab-in).
    pub fn focus(&mut self) -> Response {
        self.focused = true;
        let response = self.apply(field::on_keyboard_focus(&self.state, &self.settings));
        #[cfg(feature = "tracing")]
        self.trace_edit("focus");
        response
    }

    /// Lose focus.
    pub fn blur(&mut self) -> Response {
        self.focused = false;
        let response = self.apply(field::on_blur(&self.state, &self.settings));
        #[cfg(feature = "tracing")]
        self.trace_edit("blur");
        response
    }

    // --- Events ---

    /// Handle a terminal event.
    ///
    /// The returned response tells the host whether to suppress the
    /// event's default action and which notifications to raise.
    pub fn handle_event(&mut self, event: &Event) -> Response {
        let response = match event {
            Event::Key(key) if self.focused => {
                let response = self.apply(field::on_keydown(&self.state, &self.settings, key));
                if response.release_focus {
                    self.focused = false;
                    let blurred = self.apply(field::on_blur(&self.state, &self.settings));
                    response.merge(blurred)
                } else {
                    response
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) if self.hit(mouse.x, mouse.y) => {
                    self.focused = true;
                    let offset = usize::from(mouse.x - self.origin_x);
                    self.state.selection = Selection::caret(offset.min(self.state.char_len()));
                    self.apply(field::on_click_focus(&self.state))
                }
                _ => pass_through(),
            },
            Event::Focus(true) if !self.focused => {
                self.focused = true;
                self.apply(field::on_keyboard_focus(&self.state, &self.settings))
            }
            Event::Focus(false) if self.focused => {
                self.focused = false;
                self.apply(field::on_blur(&self.state, &self.settings))
            }
            Event::Paste(_) if self.focused => self.apply(field::on_paste(&self.state)),
            _ => pass_through(),
        };

        #[cfg(feature = "tracing")]
        if response.disposition != Disposition::PassThrough {
            self.trace_edit(Self::event_operation_name(event));
        }

        response
    }

    fn hit(&self, x: u16, y: u16) -> bool {
        let width = u16::try_from(self.state.char_len()).unwrap_or(u16::MAX);
        y == self.origin_y && x >= self.origin_x && x <= self.origin_x.saturating_add(width)
    }

    fn apply(&mut self, outcome: Outcome) -> Response {
        self.state = outcome.state;
        outcome.response
    }

    #[cfg(feature = "tracing")]
    fn trace_edit(&self, operation: &'static str) {
        let _span = tracing::debug_span!(
            "duration_input.edit",
            operation,
            segment = self.state.segment.name(),
            selection_start = self.state.selection.start,
            selection_end = self.state.selection.end,
            value_len = self.state.value.len()
        )
        .entered();
    }

    #[cfg(feature = "tracing")]
    fn event_operation_name(event: &Event) -> &'static str {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up => "step_up",
                KeyCode::Down => "step_down",
                KeyCode::Left => "segment_left",
                KeyCode::Right => "segment_right",
                KeyCode::Tab if key.shift() => "tab_left",
                KeyCode::Tab => "tab_right",
                KeyCode::BackTab => "tab_left",
                KeyCode::Enter => "commit",
                KeyCode::Backspace => "delete_back",
                KeyCode::Char(_) if key.digit().is_some() => "insert_digit",
                _ => "key_rejected",
            },
            Event::Mouse(_) => "click_focus",
            Event::Focus(true) => "keyboard_focus",
            Event::Focus(false) => "blur",
            Event::Paste(_) => "paste",
            Event::Resize { .. } => "resize",
        }
    }
}

fn pass_through() -> Response {
    Response {
        disposition: Disposition::PassThrough,
        ..Response::default()
    }
}

/// Whether `code` is handled by the field rather than by host shortcuts.
#[must_use]
pub fn is_field_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Enter
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use durpick_core::event::{KeyEvent, MouseEvent};
    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn click(x: u16) -> Event {
        Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, 0))
    }

    #[test]
    fn new_shows_initial_value() {
        let input = DurationInput::new(FieldSettings::new(Bounds::default(), 61_000));
        assert_eq!(input.value(), "00 | 00:01:01.000");
        assert_eq!(input.segment(), Segment::Hours);
        assert_eq!(input.adjustment_factor(), 3_600_000);
        assert!(!input.focused());
    }

    #[test]
    fn keys_are_ignored_without_focus() {
        let mut input = DurationInput::default();
        let response = input.handle_event(&press(KeyCode::Up));
        assert_eq!(response.disposition, Disposition::PassThrough);
        assert_eq!(input.value(), "00 | 00:00:00.000");
    }

    #[test]
    fn focus_event_selects_days() {
        let mut input = DurationInput::default();
        input.handle_event(&Event::Focus(true));
        assert!(input.focused());
        assert_eq!(input.segment(), Segment::Days);
        assert_eq!(input.display_parts(), ("", "00", " | 00:00:00.000"));
    }

    #[test]
    fn with_value_keeps_the_field_in_bounds() {
        let input = DurationInput::new(FieldSettings::new(Bounds::new(0, 3_600_000), 0))
            .with_value("50 | 00:00:00.000");
        assert_eq!(input.value(), "00 | 01:00:00.000");
        assert!(input.millis() <= input.bounds().max());
    }

    #[test]
    fn click_respects_origin() {
        let mut input = DurationInput::default().with_origin(10, 0);
        input.handle_event(&click(19));
        assert!(input.focused());
        assert_eq!(input.segment(), Segment::Minutes);
        assert_eq!(input.selection(), Selection::new(8, 10));
        assert_eq!(input.cursor_position(), (18, 0));
    }

    #[test]
    fn click_outside_passes_through() {
        let mut input = DurationInput::default().with_origin(10, 0);
        let response = input.handle_event(&click(2));
        assert_eq!(response.disposition, Disposition::PassThrough);
        assert!(!input.focused());
    }

    #[test]
    fn enter_commits_then_blurs() {
        let mut input = DurationInput::default().with_focused(true);
        input.handle_event(&press(KeyCode::Up));
        let response = input.handle_event(&press(KeyCode::Enter));
        assert!(!input.focused());
        assert!(response.input);
        assert!(response.release_focus);
        assert_eq!(input.value(), "00 | 01:00:00.000");
    }

    #[test]
    fn focus_out_blurs() {
        let mut input = DurationInput::default().with_focused(true);
        let response = input.handle_event(&Event::Focus(false));
        assert!(!input.focused());
        assert!(!response.value_changed);
        assert!(!response.input);
    }

    #[test]
    fn paste_is_rejected() {
        let mut input = DurationInput::default().with_focused(true);
        let response = input.handle_event(&Event::Paste("12".into()));
        assert_eq!(response.disposition, Disposition::Rejected);
        assert_eq!(input.value(), "00 | 00:00:00.000");
    }

    #[test]
    fn set_value_normalizes() {
        let mut input = DurationInput::default();
        assert!(input.set_value("1 | 2:3:4.5"));
        assert_eq!(input.value(), "01 | 02:03:04.005");
        assert!(!input.set_value("01 | 02:03:04.005"));
    }

    #[test]
    fn set_millis_clamps() {
        let mut input = DurationInput::new(FieldSettings::new(Bounds::new(0, 1_000), 0));
        input.set_millis(5_000);
        assert_eq!(input.millis(), 1_000);
    }

    #[test]
    fn from_config_resolves_attributes() {
        let config = PickerConfig::default()
            .with_duration("0:00:30")
            .with_adjustment_factor("1000");
        let input = DurationInput::from_config(&config);
        assert_eq!(input.value(), "00 | 00:00:30.000");
        assert_eq!(input.segment(), Segment::Seconds);
    }

    #[test]
    fn field_keys() {
        assert!(is_field_key(KeyCode::Char('1')));
        assert!(is_field_key(KeyCode::Enter));
        assert!(!is_field_key(KeyCode::Escape));
        assert!(!is_field_key(KeyCode::F(1)));
    }

    #[cfg(feature = "tracing")]
    #[derive(Debug, Default)]
    struct EditTraceState {
        span_count: usize,
        operations: Vec<String>,
    }

    #[cfg(feature = "tracing")]
    struct EditTraceCapture {
        state: Arc<Mutex<EditTraceState>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for EditTraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::Id,
            _ctx: Context<'_, S>,
        ) {
            if attrs.metadata().name() != "duration_input.edit" {
                return;
            }

            #[derive(Default)]
            struct OperationVisitor {
                operation: Option<String>,
            }

            impl tracing::field::Visit for OperationVisitor {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "operation" {
                        self.operation = Some(format!("{value:?}").trim_matches('"').to_owned());
                    }
                }

                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    if field.name() == "operation" {
                        self.operation = Some(value.to_owned());
                    }
                }
            }

            let mut visitor = OperationVisitor::default();
            attrs.record(&mut visitor);

            let mut state = self.state.lock().expect("trace state lock");
            state.span_count += 1;
            if let Some(operation) = visitor.operation {
                state.operations.push(operation);
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn edits_emit_spans() {
        let state = Arc::new(Mutex::new(EditTraceState::default()));
        let subscriber = tracing_subscriber::registry().with(EditTraceCapture {
            state: Arc::clone(&state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();

        let mut input = DurationInput::default().with_focused(true);
        input.handle_event(&press(KeyCode::Up));
        input.handle_event(&press(KeyCode::Right));
        input.handle_event(&press(KeyCode::Char('x')));

        tracing::callsite::rebuild_interest_cache();
        let snapshot = state.lock().expect("trace state lock");
        assert_eq!(snapshot.span_count, 3);
        assert_eq!(
            snapshot.operations,
            vec!["step_up", "segment_right", "key_rejected"]
        );
    }
}

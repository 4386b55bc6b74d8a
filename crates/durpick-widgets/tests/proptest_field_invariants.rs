//! Property-based invariant tests for the duration field state machine.
//!
//! 1. The selection never leaves the text.
//! 2. Rejected and passed-through keys never change the state.
//! 3. Blur always leaves a canonical value inside the bounds.
//! 4. Blur is idempotent: a second blur rewrites nothing.
//! 5. Arrow steps never leave the bounds.

use durpick_core::event::{KeyCode, KeyEvent, Modifiers};
use durpick_core::selection::Selection;
use durpick_text::{Bounds, MAX_REPRESENTABLE, Segment, encode, is_canonical};
use durpick_widgets::field::{self, Disposition, FieldSettings, FieldState};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_key() -> impl Strategy<Value = KeyEvent> {
    let code = prop_oneof![
        4 => (0u8..10).prop_map(|d| KeyCode::Char(char::from(b'0' + d))),
        1 => Just(KeyCode::Char('x')),
        2 => Just(KeyCode::Backspace),
        2 => Just(KeyCode::Up),
        2 => Just(KeyCode::Down),
        2 => Just(KeyCode::Left),
        2 => Just(KeyCode::Right),
        1 => Just(KeyCode::Tab),
        1 => Just(KeyCode::BackTab),
        1 => Just(KeyCode::Enter),
        1 => Just(KeyCode::Escape),
    ];
    (code, prop::bool::weighted(0.1)).prop_map(|(code, shift)| {
        let modifiers = if shift { Modifiers::SHIFT } else { Modifiers::NONE };
        KeyEvent::new(code).with_modifiers(modifiers)
    })
}

fn arb_settings() -> impl Strategy<Value = FieldSettings> {
    (
        0..=MAX_REPRESENTABLE,
        0..=MAX_REPRESENTABLE,
        0..=MAX_REPRESENTABLE,
    )
        .prop_map(|(a, b, initial)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            FieldSettings::new(Bounds::new(lo, hi), initial)
        })
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop::sample::select(Segment::ALL.to_vec())
}

fn start(settings: &FieldSettings, segment: Segment) -> FieldState {
    let state = FieldState::new("", settings);
    field::highlight(&state, segment).state
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_stays_inside_text(
        settings in arb_settings(),
        segment in arb_segment(),
        keys in prop::collection::vec(arb_key(), 0..40),
    ) {
        let mut state = start(&settings, segment);
        for key in &keys {
            state = field::on_keydown(&state, &settings, key).state;
            prop_assert!(state.selection.end <= state.char_len(), "{:?}", state);
        }
    }

    #[test]
    fn refused_keys_leave_state_alone(
        settings in arb_settings(),
        segment in arb_segment(),
        keys in prop::collection::vec(arb_key(), 0..40),
    ) {
        let mut state = start(&settings, segment);
        for key in &keys {
            let outcome = field::on_keydown(&state, &settings, key);
            if outcome.response.disposition != Disposition::Consumed {
                prop_assert_eq!(&outcome.state, &state);
                prop_assert!(!outcome.response.value_changed);
            }
            state = outcome.state;
        }
    }

    #[test]
    fn blur_yields_canonical_value_in_bounds(
        settings in arb_settings(),
        segment in arb_segment(),
        keys in prop::collection::vec(arb_key(), 0..40),
    ) {
        let mut state = start(&settings, segment);
        for key in &keys {
            state = field::on_keydown(&state, &settings, key).state;
        }
        let blurred = field::on_blur(&state, &settings).state;
        prop_assert!(is_canonical(&blurred.value), "{}", blurred.value);
        let millis = blurred.millis();
        prop_assert!(settings.bounds.min() <= millis && millis <= settings.bounds.max());

        let again = field::on_blur(&blurred, &settings);
        prop_assert!(!again.response.value_changed);
        prop_assert!(!again.response.input);
        prop_assert_eq!(again.state, blurred);
    }

    #[test]
    fn arrow_steps_stay_in_bounds(
        settings in arb_settings(),
        segment in arb_segment(),
        ups in prop::collection::vec(prop::bool::ANY, 1..30),
    ) {
        let mut state = start(&settings, segment);
        for up in ups {
            let code = if up { KeyCode::Up } else { KeyCode::Down };
            state = field::on_keydown(&state, &settings, &KeyEvent::new(code)).state;
            let millis = state.millis();
            prop_assert!(settings.bounds.min() <= millis && millis <= settings.bounds.max());
            prop_assert_eq!(state.segment, segment);
        }
    }

    #[test]
    fn click_anywhere_selects_a_whole_span(value in 0..=MAX_REPRESENTABLE, offset in 0usize..18) {
        let settings = FieldSettings::default();
        let mut state = FieldState::new(&encode(value), &settings);
        state.selection = Selection::caret(offset.min(state.char_len()));
        let outcome = field::on_click_focus(&state);
        let span = durpick_text::span_for(&outcome.state.value, outcome.state.segment);
        prop_assert_eq!(Some(outcome.state.selection), span.map(Selection::from));
    }
}

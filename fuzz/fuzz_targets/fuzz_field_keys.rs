#![no_main]

use arbitrary::Arbitrary;
use durpick_core::event::{KeyCode, KeyEvent, Modifiers};
use durpick_text::{Bounds, is_canonical};
use durpick_widgets::field::{self, Disposition, FieldSettings, FieldState};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Key {
    Digit(u8),
    Other(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Enter,
}

impl Key {
    fn event(&self) -> KeyEvent {
        let code = match *self {
            Self::Digit(d) => KeyCode::Char(char::from(b'0' + d % 10)),
            Self::Other(c) => KeyCode::Char(c),
            Self::Backspace => KeyCode::Backspace,
            Self::Up => KeyCode::Up,
            Self::Down => KeyCode::Down,
            Self::Left => KeyCode::Left,
            Self::Right => KeyCode::Right,
            Self::Tab => KeyCode::Tab,
            Self::BackTab => KeyCode::BackTab,
            Self::Enter => KeyCode::Enter,
        };
        KeyEvent::new(code).with_modifiers(Modifiers::NONE)
    }
}

#[derive(Debug, Arbitrary)]
struct Session {
    min: u64,
    max: u64,
    initial: u64,
    text: String,
    keys: Vec<Key>,
}

fuzz_target!(|session: Session| {
    if session.keys.len() > 256 || session.text.len() > 256 {
        return;
    }
    let (lo, hi) = if session.min <= session.max {
        (session.min, session.max)
    } else {
        (session.max, session.min)
    };
    let settings = FieldSettings::new(Bounds::new(lo, hi), session.initial);
    let mut state = FieldState::new(&session.text, &settings);
    let millis = state.millis();
    assert!(settings.bounds.min() <= millis && millis <= settings.bounds.max());
    state = field::on_keyboard_focus(&state, &settings).state;

    for key in &session.keys {
        let outcome = field::on_keydown(&state, &settings, &key.event());
        assert!(outcome.state.selection.end <= outcome.state.char_len());
        if outcome.response.disposition != Disposition::Consumed {
            assert_eq!(outcome.state, state);
        }
        state = outcome.state;
    }

    let blurred = field::on_blur(&state, &settings).state;
    assert!(is_canonical(&blurred.value), "{:?}", blurred.value);
    let millis = blurred.millis();
    assert!(settings.bounds.min() <= millis && millis <= settings.bounds.max());
});

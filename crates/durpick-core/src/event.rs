#![forbid(unsafe_code)]

//! Input events a duration field reacts to.
//!
//! Hosts translate whatever their backend delivers into [`Event`]; with the
//! `crossterm` feature, [`Event::from_crossterm`] does that for terminals.
//! Only what a single-line entry field can use is modelled: keys, button
//! clicks, focus changes, pastes and resizes.
//!
//! A click reaches the field as a mouse `Up` event at a screen cell;
//! keyboard focus (tab-in) is `Focus(true)`.

use bitflags::bitflags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The host surface changed size (columns, rows).
    Resize { width: u16, height: u16 },
    /// Text delivered in one piece by the host (bracketed paste, drop).
    Paste(String),
    /// `true` when the host hands focus to the field, `false` when it leaves.
    Focus(bool),
}

/// One key press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the key is the character `c`, whatever the modifiers.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    /// The ASCII digit this key types, if any.
    ///
    /// Shift is tolerated; Ctrl, Alt and Super chords are shortcuts, not
    /// digits.
    #[must_use]
    pub fn digit(&self) -> Option<char> {
        let chord = Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER;
        match self.code {
            KeyCode::Char(c) if c.is_ascii_digit() && !self.modifiers.intersects(chord) => Some(c),
            _ => None,
        }
    }

    /// Press or auto-repeat. Releases never edit the field.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    /// Shift+Tab as reported by terminals that fold the modifier in.
    BackTab,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F1..=F24`.
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Hosts that cannot tell presses from repeats report `Press`.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// A mouse button event at a 0-indexed screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod from_crossterm {
    use super::{
        Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use crossterm::event as ct;

    impl Event {
        /// Translate a crossterm event.
        ///
        /// Drags, moves, scrolling and keys the field has no use for
        /// (media keys, lone modifiers, ...) map to `None`.
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => Some(Self::Key(KeyEvent {
                    code: key_code(key.code)?,
                    modifiers: modifiers(key.modifiers),
                    kind: match key.kind {
                        ct::KeyEventKind::Press => KeyEventKind::Press,
                        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                        ct::KeyEventKind::Release => KeyEventKind::Release,
                    },
                })),
                ct::Event::Mouse(mouse) => {
                    let kind = match mouse.kind {
                        ct::MouseEventKind::Down(button) => MouseEventKind::Down(mouse_button(button)),
                        ct::MouseEventKind::Up(button) => MouseEventKind::Up(mouse_button(button)),
                        _ => return None,
                    };
                    Some(Self::Mouse(MouseEvent::new(kind, mouse.column, mouse.row)))
                }
                ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
                ct::Event::Paste(text) => Some(Self::Paste(text)),
                ct::Event::FocusGained => Some(Self::Focus(true)),
                ct::Event::FocusLost => Some(Self::Focus(false)),
                #[allow(unreachable_patterns)]
                _ => None,
            }
        }
    }

    fn key_code(code: ct::KeyCode) -> Option<KeyCode> {
        Some(match code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        })
    }

    fn modifiers(mods: ct::KeyModifiers) -> Modifiers {
        [
            (ct::KeyModifiers::SHIFT, Modifiers::SHIFT),
            (ct::KeyModifiers::ALT, Modifiers::ALT),
            (ct::KeyModifiers::CONTROL, Modifiers::CTRL),
            (ct::KeyModifiers::SUPER, Modifiers::SUPER),
        ]
        .into_iter()
        .filter(|(theirs, _)| mods.contains(*theirs))
        .fold(Modifiers::NONE, |acc, (_, ours)| acc | ours)
    }

    fn mouse_button(button: ct::MouseButton) -> MouseButton {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn keys_keep_modifiers_and_kind() {
            let key = ct::KeyEvent::new_with_kind(
                ct::KeyCode::Char('c'),
                ct::KeyModifiers::CONTROL | ct::KeyModifiers::SHIFT,
                ct::KeyEventKind::Repeat,
            );
            let Some(Event::Key(event)) = Event::from_crossterm(ct::Event::Key(key)) else {
                panic!("key not translated");
            };
            assert!(event.is_char('c'));
            assert_eq!(event.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
            assert_eq!(event.kind, KeyEventKind::Repeat);
        }

        #[test]
        fn esc_becomes_escape() {
            let key = ct::KeyEvent::new(ct::KeyCode::Esc, ct::KeyModifiers::NONE);
            assert_eq!(
                Event::from_crossterm(ct::Event::Key(key)),
                Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
            );
        }

        #[test]
        fn clicks_translate_and_drags_do_not() {
            let mouse = |kind| {
                ct::Event::Mouse(ct::MouseEvent {
                    kind,
                    column: 12,
                    row: 3,
                    modifiers: ct::KeyModifiers::NONE,
                })
            };
            assert_eq!(
                Event::from_crossterm(mouse(ct::MouseEventKind::Up(ct::MouseButton::Left))),
                Some(Event::Mouse(MouseEvent::new(
                    MouseEventKind::Up(MouseButton::Left),
                    12,
                    3
                )))
            );
            assert_eq!(
                Event::from_crossterm(mouse(ct::MouseEventKind::Drag(ct::MouseButton::Left))),
                None
            );
        }

        #[test]
        fn focus_and_paste() {
            assert_eq!(
                Event::from_crossterm(ct::Event::FocusLost),
                Some(Event::Focus(false))
            );
            assert_eq!(
                Event::from_crossterm(ct::Event::Paste("12".into())),
                Some(Event::Paste("12".into()))
            );
        }
    }
}

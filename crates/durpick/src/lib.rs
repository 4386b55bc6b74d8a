#![forbid(unsafe_code)]

//! durpick public facade crate.
//!
//! A structured `DD | HH:MM:SS.mmm` duration entry field: a codec between
//! milliseconds and the canonical text, a segment locator, tolerant
//! validation, and the keyboard state machine that edits one segment at a
//! time. This crate re-exports the common types and offers the host-facing
//! operations as free functions.
//!
//! # Example
//!
//! ```
//! use durpick::prelude::*;
//!
//! let config = PickerConfig::default().with_max("1:00:00");
//! assert_eq!(durpick::compute_initial_value(&config), 0);
//!
//! let mut field = DurationInput::from_config(&config).with_focused(true);
//! field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Up)));
//! assert_eq!(field.value(), "00 | 01:00:00.000");
//!
//! // Clamped to the configured maximum.
//! field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Up)));
//! assert_eq!(durpick::parse_value(field.value()), 3_600_000);
//! ```

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use durpick_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use durpick_core::selection::Selection;
#[cfg(feature = "crossterm")]
pub use durpick_core::terminal_session::{SessionOptions, TerminalSession};

// --- Text re-exports -------------------------------------------------------

pub use durpick_text::{
    Bounds, DEFAULT_CANONICAL, DurationParts, Located, MAX_REPRESENTABLE, Segment, SegmentTable,
};

// --- Widget re-exports -----------------------------------------------------

pub use durpick_widgets::field::{
    commit, highlight, on_blur, on_change, on_click_focus, on_input, on_keyboard_focus,
    on_keydown, on_paste,
};
pub use durpick_widgets::{
    Disposition, DurationInput, FieldSettings, FieldState, Outcome, PickerConfig,
    PickerConfigError, Recovery, Response,
};

// --- Host operations -------------------------------------------------------

/// The initial value a field shows: the `duration` attribute clamped into
/// the configured bounds (0 when absent or malformed).
#[must_use]
pub fn compute_initial_value(config: &PickerConfig) -> u64 {
    config.initial_value()
}

/// Render milliseconds as canonical text.
#[must_use]
pub fn format_value(millis: u64) -> String {
    durpick_text::encode(millis)
}

/// Tolerantly parse field text to milliseconds.
#[must_use]
pub fn parse_value(text: &str) -> u64 {
    durpick_text::decode(text)
}

/// The segment under a cursor offset, with its highlight span.
#[must_use]
pub fn locate_segment(text: &str, offset: usize) -> Option<Located> {
    durpick_text::locate(text, offset)
}

/// Repair malformed text; `None` when no repair is needed.
#[must_use]
pub fn sanitize(text: &str) -> Option<String> {
    durpick_text::sanitize(text)
}

/// Constrain `value` into `[min, max]`.
#[must_use]
pub fn clamp(value: u64, min: u64, max: u64) -> u64 {
    durpick_text::clamp(value, min, max)
}

/// Load field attributes from a `.toml` or `.json` file.
///
/// The format follows the extension; anything other than `.json` is read
/// as TOML.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<Path>) -> Result<PickerConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        PickerConfig::from_json_file(path)?
    } else {
        PickerConfig::from_toml_file(path)?
    };
    Ok(config)
}

// --- Errors ---------------------------------------------------------------

/// Top-level error type for durpick hosts.
///
/// The field itself never fails; only host I/O and configuration loading
/// do.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Configuration could not be loaded.
    Config(PickerConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PickerConfigError> for Error {
    fn from(err: PickerConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for durpick APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bounds, Disposition, DurationInput, Error, Event, FieldSettings, FieldState, KeyCode,
        KeyEvent, Modifiers, PickerConfig, Recovery, Response, Result, Segment, Selection,
    };

    pub use crate::{core, text, widgets};
}

pub use durpick_core as core;
pub use durpick_text as text;
pub use durpick_widgets as widgets;

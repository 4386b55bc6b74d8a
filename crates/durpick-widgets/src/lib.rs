#![forbid(unsafe_code)]

//! The segment-aware duration input state machine.
//!
//! - [`field`]: pure decision functions over a [`FieldState`], one per
//!   host event (click, tab-in, keydown, input, change, blur).
//! - [`duration_input`]: the [`DurationInput`] widget, which owns a field
//!   and routes canonical events to those functions.
//! - [`config`]: host attributes ([`PickerConfig`]) and their resolution
//!   into [`FieldSettings`].

pub mod config;
pub mod duration_input;
pub mod field;

pub use config::{PickerConfig, PickerConfigError};
pub use duration_input::DurationInput;
pub use field::{Disposition, FieldSettings, FieldState, Outcome, Recovery, Response};

#![forbid(unsafe_code)]

//! Core: canonical events, selections, and terminal lifecycle.
//!
//! # Role in durpick
//! `durpick-core` is the input layer. It owns the normalized event types that
//! the duration field consumes, the half-open [`selection::Selection`] range
//! shared by every layer above it, and (behind the `crossterm` feature) an
//! RAII terminal session for hosts that drive a field from a real terminal.
//!
//! # How it fits in the system
//! `durpick-text` is independent of input entirely; `durpick-widgets` turns
//! [`event::Event`] values into edits of a duration field, so this crate is
//! the bridge between host I/O and the deterministic field state machine.

pub mod event;
pub mod selection;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub mod terminal_session;

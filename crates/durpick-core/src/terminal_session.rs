#![forbid(unsafe_code)]

//! Raw-mode terminal session for hosting a field.
//!
//! A [`TerminalSession`] enters raw mode, switches on the terminal modes a
//! duration field host asks for, and switches them off again in reverse
//! order when dropped. A panic hook restores the terminal before the
//! previous hook prints, so a panicking host does not leave the shell in
//! raw mode.
//!
//! ```no_run
//! use durpick_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     mouse_capture: true,
//!     focus_events: true,
//!     ..Default::default()
//! })?;
//! if session.poll_event(std::time::Duration::from_millis(100))? {
//!     let _event = session.read_event()?;
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{cursor, event as ct, execute, terminal};

use crate::event::Event;

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Terminal modes to enable on top of raw mode. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Draw on the alternate screen and restore the shell's screen on exit.
    pub alternate_screen: bool,
    /// Report mouse buttons, so clicks can place the caret.
    pub mouse_capture: bool,
    /// Deliver pastes as a single event instead of a burst of keys.
    pub bracketed_paste: bool,
    /// Report focus changes, so the field sees blur.
    pub focus_events: bool,
}

impl SessionOptions {
    fn modes(self) -> Vec<Mode> {
        [
            (self.alternate_screen, Mode::AlternateScreen),
            (self.mouse_capture, Mode::MouseCapture),
            (self.bracketed_paste, Mode::BracketedPaste),
            (self.focus_events, Mode::FocusEvents),
        ]
        .into_iter()
        .filter_map(|(wanted, mode)| wanted.then_some(mode))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    AlternateScreen,
    MouseCapture,
    BracketedPaste,
    FocusEvents,
}

impl Mode {
    const ALL: [Mode; 4] = [
        Mode::AlternateScreen,
        Mode::MouseCapture,
        Mode::BracketedPaste,
        Mode::FocusEvents,
    ];

    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::AlternateScreen => execute!(
                out,
                terminal::EnterAlternateScreen,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            ),
            Self::MouseCapture => execute!(out, ct::EnableMouseCapture),
            Self::BracketedPaste => execute!(out, ct::EnableBracketedPaste),
            Self::FocusEvents => execute!(out, ct::EnableFocusChange),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::AlternateScreen => execute!(out, terminal::LeaveAlternateScreen),
            Self::MouseCapture => execute!(out, ct::DisableMouseCapture),
            Self::BracketedPaste => execute!(out, ct::DisableBracketedPaste),
            Self::FocusEvents => execute!(out, ct::DisableFocusChange),
        }
    }

    #[cfg(feature = "tracing")]
    fn name(self) -> &'static str {
        match self {
            Self::AlternateScreen => "alternate_screen",
            Self::MouseCapture => "mouse_capture",
            Self::BracketedPaste => "bracketed_paste",
            Self::FocusEvents => "focus_events",
        }
    }
}

/// RAII guard over raw mode and the enabled [`SessionOptions`].
///
/// One session per process: a second [`TerminalSession::new`] while one is
/// alive fails with an I/O error.
#[derive(Debug)]
pub struct TerminalSession {
    enabled: Vec<Mode>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Fails when another session is alive or the terminal refuses a mode.
    /// Anything already enabled is restored before returning the error.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        if ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(io::Error::other("a terminal session is already active"));
        }
        install_panic_hook();

        if let Err(err) = terminal::enable_raw_mode() {
            ACTIVE.store(false, Ordering::SeqCst);
            return Err(err);
        }
        let mut session = Self {
            enabled: Vec::with_capacity(Mode::ALL.len()),
        };

        let mut stdout = io::stdout();
        for mode in options.modes() {
            // On error, dropping `session` undoes the modes enabled so far.
            mode.enable(&mut stdout)?;
            session.enabled.push(mode);
            #[cfg(feature = "tracing")]
            tracing::debug!(mode = mode.name(), "terminal mode enabled");
        }
        Ok(session)
    }

    /// Wait up to `timeout` for input. `Ok(true)` when an event is ready.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        ct::poll(timeout)
    }

    /// Read the next event, blocking. `Ok(None)` for input the field has
    /// no use for.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(ct::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        while let Some(mode) = self.enabled.pop() {
            let _ = mode.disable(&mut stdout);
            #[cfg(feature = "tracing")]
            tracing::debug!(mode = mode.name(), "terminal mode disabled");
        }
        let _ = execute!(stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        ACTIVE.store(false, Ordering::SeqCst);
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if ACTIVE.load(Ordering::SeqCst) {
                restore_everything();
            }
            previous(info);
        }));
    });
}

/// Switch off every mode regardless of what was enabled.
fn restore_everything() {
    let mut stdout = io::stdout();
    for mode in Mode::ALL.into_iter().rev() {
        let _ = mode.disable(&mut stdout);
    }
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

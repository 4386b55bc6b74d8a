//! Event loop state and rendering for the demo screen.
//!
//! The demo plays the host: it moves focus in and out of the field with
//! Tab, forwards everything else to [`DurationInput::handle_event`], and
//! turns the returned [`Response`]s into a notification history.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use durpick::prelude::*;
use durpick::widgets::duration_input::is_field_key;

const FIELD_ROW: u16 = 2;
const LABEL: &str = "Duration: ";
const FIELD_COL: u16 = 10;
const STATUS_ROW: u16 = 4;
const HISTORY_ROW: u16 = 7;
const HISTORY_LEN: usize = 8;
const HELP: &str = "Tab focus/next  Shift-Tab prev  arrows step/move  Enter commit  Esc quit";

pub struct App {
    input: DurationInput,
    history: VecDeque<String>,
    quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            input: DurationInput::from_config(config).with_origin(FIELD_COL, FIELD_ROW),
            history: VecDeque::with_capacity(HISTORY_LEN),
            quit: false,
        }
    }

    #[must_use]
    pub fn input(&self) -> &DurationInput {
        &self.input
    }

    /// Notifications, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if !key.is_press() {
                return;
            }
            if key.code == KeyCode::Escape || (key.ctrl() && key.is_char('c')) {
                self.quit = true;
                return;
            }
            if !self.input.focused() {
                if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    let response = self.input.focus();
                    self.record("focus", response);
                }
                return;
            }
            if !is_field_key(key.code) {
                return;
            }
        }

        let response = self.input.handle_event(event);
        let tabbed_out = matches!(
            event,
            Event::Key(key) if matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
        ) && response.disposition == Disposition::PassThrough;

        if tabbed_out {
            let blurred = self.input.blur();
            self.record("blur", response.merge(blurred));
        } else {
            self.record(event_label(event), response);
        }
    }

    fn record(&mut self, source: &str, response: Response) {
        let value = self.input.value().to_owned();
        if response.disposition == Disposition::Rejected {
            self.push(format!("{source:<8} refused ({:?})", response.recovery));
            return;
        }
        if response.input {
            self.push(format!("{source:<8} input   {value}"));
        }
        if response.value_changed {
            tracing::info!(
                source,
                value = %value,
                millis = self.input.millis(),
                "duration changed"
            );
            self.push(format!("{source:<8} change  {value}"));
        }
        if let Some(recovery) = response.recovery {
            tracing::debug!(source, ?recovery, "field recovered");
        }
    }

    fn push(&mut self, line: String) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(line);
    }

    /// Draw the whole screen.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(HELP))?;

        queue!(out, MoveTo(0, FIELD_ROW), Print(LABEL))?;
        if self.input.focused() {
            let (before, selected, after) = self.input.display_parts();
            queue!(
                out,
                Print(before),
                SetAttribute(Attribute::Reverse),
                Print(selected),
                SetAttribute(Attribute::Reset),
                Print(after)
            )?;
        } else {
            queue!(out, Print(self.input.value()))?;
        }

        let bounds = self.input.bounds();
        queue!(
            out,
            MoveTo(0, STATUS_ROW),
            Print(format!(
                "segment {:<13} step {} ms  value {} ms",
                self.input.segment().name(),
                self.input.adjustment_factor(),
                self.input.millis()
            )),
            MoveTo(0, STATUS_ROW + 1),
            Print(format!(
                "range   {} .. {}",
                durpick::format_value(bounds.min()),
                durpick::format_value(bounds.max())
            ))
        )?;

        if self.input.focused() {
            queue!(
                out,
                MoveTo(0, STATUS_ROW + 2),
                Print(format!(
                    "selected {:?}",
                    self.input.state().selected_text()
                ))
            )?;
        }

        for (row, line) in (HISTORY_ROW..).zip(&self.history) {
            queue!(out, MoveTo(0, row), Print(line))?;
        }

        if self.input.focused() {
            let (x, y) = self.input.cursor_position();
            queue!(out, MoveTo(x, y), Show)?;
        } else {
            queue!(out, Hide)?;
        }
        out.flush()
    }
}

fn event_label(event: &Event) -> &'static str {
    match event {
        Event::Key(_) => "key",
        Event::Mouse(_) => "click",
        Event::Focus(true) => "focus",
        Event::Focus(false) => "blur",
        Event::Paste(_) => "paste",
        Event::Resize { .. } => "resize",
    }
}

/// Plain-text summary of how a config resolves.
#[must_use]
pub fn settings_report(config: &PickerConfig) -> String {
    let settings = config.resolve();
    let mut report = format!(
        "min      {}\nmax      {}\ninitial  {}\nsegment  {} (step {} ms)\n",
        durpick::format_value(settings.bounds.min()),
        durpick::format_value(settings.bounds.max()),
        settings.initial_text(),
        settings.segment.name(),
        settings.segment.step_ms()
    );
    for problem in config.validate() {
        report.push_str("warning  ");
        report.push_str(&problem);
        report.push('\n');
    }
    report
}

#![forbid(unsafe_code)]

//! Terminal demo host for the durpick duration field.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;

use std::io;
use std::time::Duration;

use clap::Parser;
use durpick::{SessionOptions, TerminalSession};

use crate::app::{App, settings_report};
use crate::cli::Cli;
use crate::error::Result;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;

    let config = cli.picker_config()?;
    for problem in config.validate() {
        tracing::warn!(%problem, "field attribute falls back to its default");
    }

    if cli.check {
        print!("{}", settings_report(&config));
        return Ok(());
    }

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: true,
        bracketed_paste: true,
        focus_events: true,
    })?;

    let mut app = App::new(&config);
    let mut stdout = io::stdout();
    app.render(&mut stdout)?;

    while !app.should_quit() {
        if !session.poll_event(POLL_INTERVAL)? {
            continue;
        }
        if let Some(event) = session.read_event()? {
            app.handle(&event);
            app.render(&mut stdout)?;
        }
    }

    drop(session);
    tracing::info!(value = app.input().value(), "demo finished");
    println!("{}", app.input().value());
    Ok(())
}

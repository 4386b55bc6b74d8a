//! Log subscriber for the demo.
//!
//! Logs go to stderr unless `--log-file` names a file. The default filter
//! only lets warnings through, which are all emitted before the terminal
//! session starts.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "DURPICK_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
pub fn init(path: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter());
    let installed = match path {
        Some(path) => builder
            .with_writer(Mutex::new(File::create(path)?))
            .with_ansi(false)
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|err| DemoError::Logging(err.to_string()))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

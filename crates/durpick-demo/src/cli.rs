use std::path::PathBuf;

use clap::Parser;
use durpick::PickerConfig;

use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "durpick-demo",
    about = "Edit a DD | HH:MM:SS.mmm duration in the terminal",
    version
)]
pub struct Cli {
    /// Load field attributes from a TOML or JSON file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum duration, e.g. "00 | 00:00:30.000" or "0:00:30".
    #[arg(long, value_name = "DURATION")]
    pub min: Option<String>,

    /// Maximum duration.
    #[arg(long, value_name = "DURATION")]
    pub max: Option<String>,

    /// Initial duration.
    #[arg(long, value_name = "DURATION")]
    pub duration: Option<String>,

    /// Starting step in milliseconds (selects the active segment).
    #[arg(long, value_name = "MS")]
    pub adjustment_factor: Option<String>,

    /// Write logs to this file. Filter with DURPICK_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the resolved field settings and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// The config file (if any) with command-line attributes on top.
    pub fn picker_config(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => durpick::load_config(path)?,
            None => PickerConfig::default(),
        };
        if let Some(min) = &self.min {
            config = config.with_min(min.as_str());
        }
        if let Some(max) = &self.max {
            config = config.with_max(max.as_str());
        }
        if let Some(duration) = &self.duration {
            config = config.with_duration(duration.as_str());
        }
        if let Some(factor) = &self.adjustment_factor {
            config = config.with_adjustment_factor(factor.as_str());
        }
        Ok(config)
    }
}

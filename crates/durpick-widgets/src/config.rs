#![forbid(unsafe_code)]

//! Field attributes as data.
//!
//! A [`PickerConfig`] carries the four attributes a host attaches to a
//! duration field, as the raw text the host supplied. Resolution never
//! fails: unusable attributes fall back to their defaults. [`validate`]
//! reports what fell back, for hosts that want to warn.
//!
//! # Loading
//!
//! ```toml
//! # durpick.toml
//! duration_min = "00 | 00:00:30.000"
//! duration_max = "1:00:00"
//! duration = "00 | 00:05:00.000"
//! adjustment_factor = "60000"
//! ```
//!
//! ```rust,ignore
//! let config = PickerConfig::from_toml_file("durpick.toml")?;
//! let field = DurationInput::from_config(&config);
//! ```
//!
//! [`validate`]: PickerConfig::validate

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use durpick_text::{Bounds, MAX_REPRESENTABLE, Segment, decode, is_canonical, is_legacy_clock};

use crate::field::FieldSettings;

/// Host-supplied attributes of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PickerConfig {
    /// Lower bound, as duration text. Default `0`.
    pub duration_min: Option<String>,

    /// Upper bound, as duration text. Default `MAX_REPRESENTABLE`.
    pub duration_max: Option<String>,

    /// Initial value, as duration text. Default `0`.
    pub duration: Option<String>,

    /// Persisted step size in milliseconds, selecting the active segment.
    pub adjustment_factor: Option<String>,
}

impl PickerConfig {
    /// Set the lower bound (builder).
    #[must_use]
    pub fn with_min(mut self, text: impl Into<String>) -> Self {
        self.duration_min = Some(text.into());
        self
    }

    /// Set the upper bound (builder).
    #[must_use]
    pub fn with_max(mut self, text: impl Into<String>) -> Self {
        self.duration_max = Some(text.into());
        self
    }

    /// Set the initial value (builder).
    #[must_use]
    pub fn with_duration(mut self, text: impl Into<String>) -> Self {
        self.duration = Some(text.into());
        self
    }

    /// Set the persisted adjustment factor (builder).
    #[must_use]
    pub fn with_adjustment_factor(mut self, text: impl Into<String>) -> Self {
        self.adjustment_factor = Some(text.into());
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PickerConfigError> {
        toml::from_str(s).map_err(PickerConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PickerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PickerConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PickerConfigError> {
        serde_json::from_str(s).map_err(PickerConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PickerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PickerConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// The configured bounds, each clamped into `[0, MAX_REPRESENTABLE]`.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            duration_attribute(self.duration_min.as_deref()).unwrap_or(0),
            duration_attribute(self.duration_max.as_deref()).unwrap_or(MAX_REPRESENTABLE),
        )
    }

    /// The initial value, clamped into [`bounds`](Self::bounds).
    #[must_use]
    pub fn initial_value(&self) -> u64 {
        self.bounds()
            .clamp(duration_attribute(self.duration.as_deref()).unwrap_or(0))
    }

    /// The segment selected by the persisted adjustment factor.
    ///
    /// A missing marker means hours. A marker that is not a positive
    /// integer counts as 1 (milliseconds).
    #[must_use]
    pub fn segment(&self) -> Segment {
        match self.adjustment_factor.as_deref() {
            None => Segment::Hours,
            Some(text) => Segment::from_step(parse_factor(text).unwrap_or(1)),
        }
    }

    /// Resolve into field settings.
    #[must_use]
    pub fn resolve(&self) -> FieldSettings {
        FieldSettings::new(self.bounds(), self.initial_value()).with_segment(self.segment())
    }

    /// Report attributes that will fall back to defaults, and inverted
    /// bounds.
    ///
    /// Returns a list of problems. An empty list means the config is
    /// used as written.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("duration_min", &self.duration_min),
            ("duration_max", &self.duration_max),
            ("duration", &self.duration),
        ] {
            if let Some(text) = value
                && duration_attribute(Some(text)).is_none()
            {
                errors.push(format!(
                    "{name} {text:?} is not a duration (expected DD | HH:MM:SS.mmm or H:MM:SS)"
                ));
            }
        }

        for (name, value) in [
            ("duration_min", &self.duration_min),
            ("duration_max", &self.duration_max),
        ] {
            if let Some(v) = duration_attribute(value.as_deref())
                && v > MAX_REPRESENTABLE
            {
                errors.push(format!(
                    "{name} exceeds the largest representable duration ({MAX_REPRESENTABLE} ms)"
                ));
            }
        }

        if let Some(text) = &self.adjustment_factor
            && parse_factor(text).is_none()
        {
            errors.push(format!(
                "adjustment_factor {text:?} must be a positive integer"
            ));
        }

        let bounds = self.bounds();
        if !bounds.is_ordered() {
            errors.push(format!(
                "duration_min ({}) must be <= duration_max ({})",
                bounds.min(),
                bounds.max()
            ));
        }

        errors
    }
}

/// Parse a duration attribute; `None` when absent or not a duration.
fn duration_attribute(text: Option<&str>) -> Option<u64> {
    let text = text?.trim();
    (is_canonical(text) || is_legacy_clock(text)).then(|| decode(text))
}

fn parse_factor(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok().filter(|&factor| factor > 0)
}

/// Errors that can occur when loading a picker configuration.
#[derive(Debug)]
pub enum PickerConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PickerConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PickerConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for PickerConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

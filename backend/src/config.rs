//! Back-office settings loaded via OrthoConfig.
//!
//! Values come from `BACKOFFICE_*` environment variables or a configuration
//! file; command-line flags belong to the [`crate::cli`] parser instead.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{BucketTimezone, BucketTimezoneError};

/// Errors raised while loading or interpreting settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Sources could not be read or merged.
    #[error("failed to load back-office settings: {message}")]
    Load {
        /// Loader message.
        message: String,
    },
    /// Report offset is out of range.
    #[error("invalid report offset: {0}")]
    ReportOffset(#[from] BucketTimezoneError),
    /// Log format is not one of the supported values.
    #[error("unknown log format {value:?}; expected \"json\" or \"pretty\"")]
    LogFormat {
        /// Rejected value.
        value: String,
    },
}

/// Log output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-oriented multi-line output.
    Pretty,
}

/// Configuration values for the back-office tools.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKOFFICE")]
pub struct BackofficeSettings {
    /// Minutes east of UTC used to bucket report months.
    pub report_utc_offset_minutes: Option<i32>,
    /// Log format, `json` or `pretty`.
    pub log_format: Option<String>,
    /// Default number of documents produced by `document generate`.
    #[ortho_config(default = 1)]
    pub generate_count: usize,
}

impl BackofficeSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_ambient() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("backoffice")]).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }

    /// Timezone used for monthly report buckets; UTC when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReportOffset`] for offsets of a day or more.
    pub fn bucket_timezone(&self) -> Result<BucketTimezone, ConfigError> {
        match self.report_utc_offset_minutes {
            Some(minutes) => Ok(BucketTimezone::from_offset_minutes(minutes)?),
            None => Ok(BucketTimezone::utc()),
        }
    }

    /// Configured log format; JSON when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFormat`] for unsupported values.
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.log_format.as_deref().map(str::trim) {
            None => Ok(LogFormat::default()),
            Some(value) if value.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
            Some(value) if value.eq_ignore_ascii_case("pretty") => Ok(LogFormat::Pretty),
            Some(value) => Err(ConfigError::LogFormat {
                value: value.to_owned(),
            }),
        }
    }

    /// Number of documents to generate when no count is given.
    #[must_use]
    pub const fn generate_count(&self) -> usize {
        self.generate_count
    }
}

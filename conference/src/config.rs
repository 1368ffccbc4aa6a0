//! Conference configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CONFERENCE_STATUS_PENDING | (required) | External status ID for "pending" |
//! | CONFERENCE_STATUS_IN_PROGRESS | (required) | External status ID for "in progress" |
//! | CONFERENCE_STATUS_FINALIZED | (required) | External status ID for "finalized" |
//! | SCAN_LOCK_MS | 300 | Hard lock after an accepted scan |
//! | SCAN_DUPLICATE_WINDOW_MS | 1200 | Same-code suppression window |
//! | LOG_LEVEL | info | Log level |
//! | LOG_JSON | false | JSON log output |
//! | LOG_DIR | (unset) | Directory for daily rotating log files |

use shared::conference::StatusMapping;
use std::time::Duration;
use thiserror::Error;

use crate::scan::ScanDebounceConfig;
use crate::scan::debounce::{DEFAULT_DUPLICATE_WINDOW, DEFAULT_LOCK_WINDOW};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Status IDs must be non-empty and distinct")]
    InvalidStatusMapping,
}

/// Runtime configuration for conference sessions
#[derive(Debug, Clone)]
pub struct ConferenceConfig {
    /// External status IDs
    pub status_mapping: StatusMapping,
    /// Scan debounce windows
    pub scan: ScanDebounceConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl ConferenceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::Invalid { key, value }),
            }
        };

        let status_mapping = StatusMapping::new(
            required("CONFERENCE_STATUS_PENDING")?,
            required("CONFERENCE_STATUS_IN_PROGRESS")?,
            required("CONFERENCE_STATUS_FINALIZED")?,
        );
        if !status_mapping.is_valid() {
            return Err(ConfigError::InvalidStatusMapping);
        }

        let scan = ScanDebounceConfig {
            lock_window: millis("SCAN_LOCK_MS", DEFAULT_LOCK_WINDOW)?,
            duplicate_window: millis("SCAN_DUPLICATE_WINDOW_MS", DEFAULT_DUPLICATE_WINDOW)?,
        };

        let log_json = match lookup("LOG_JSON") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(ConfigError::Invalid { key: "LOG_JSON", value }),
            },
        };

        Ok(Self {
            status_mapping,
            scan,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json,
            log_dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
        })
    }

    /// Override the status mapping
    pub fn with_status_mapping(mut self, mapping: StatusMapping) -> Self {
        self.status_mapping = mapping;
        self
    }
}

//! Exporter configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the exporter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Service-account JSON to read
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Export file to (over)write
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("firebase-service-account.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("firebase-env-output.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for a JSON log file; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

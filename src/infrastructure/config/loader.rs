//! Layered configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `input_path` is empty
    #[error("Input path cannot be empty")]
    EmptyInputPath,

    /// `output_path` is empty
    #[error("Output path cannot be empty")]
    EmptyOutputPath,

    /// Writing the export would overwrite the credential
    #[error("Output path {0} is the credential file itself")]
    OutputOverwritesInput(String),

    /// Unknown `logging.level`
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown `logging.format`
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// `--config` names a file that does not exist
    #[error("Config file not found: {0}")]
    MissingConfigFile(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Project config file, looked up in the working directory.
    pub const PROJECT_CONFIG: &'static str = ".firebase-env.yaml";

    /// Prefix for environment overrides; nested keys are separated by `__`.
    pub const ENV_PREFIX: &'static str = "FIREBASE_ENV_";

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .firebase-env.yaml (optional)
    /// 3. Environment variables (FIREBASE_ENV_* prefix)
    pub fn load() -> Result<Config> {
        let config = Self::extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file instead of the project config.
    ///
    /// Unlike [`ConfigLoader::load`], the file must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config = Self::extract_from_file(path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Merge defaults, `.firebase-env.yaml` and environment without validating.
    ///
    /// Callers layering further overrides validate the final result themselves.
    pub fn extract() -> Result<Config> {
        Self::figment(Path::new(Self::PROJECT_CONFIG))
            .extract()
            .context("Failed to extract configuration from figment")
    }

    /// Like [`ConfigLoader::extract`] with an explicit file, which must exist.
    pub fn extract_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::MissingConfigFile(path.display().to_string()).into());
        }

        Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.input_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyInputPath);
        }

        if config.output_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }

        if same_file(&config.input_path, &config.output_path) {
            return Err(ConfigError::OutputOverwritesInput(
                config.output_path.display().to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    matches!((a.canonicalize(), b.canonicalize()), (Ok(x), Ok(y)) if x == y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::LoggingConfig;
    use std::fs;
    use std::path::PathBuf;

    const ENV_VARS: [&str; 3] = [
        "FIREBASE_ENV_INPUT_PATH",
        "FIREBASE_ENV_OUTPUT_PATH",
        "FIREBASE_ENV_LOGGING__LEVEL",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_path, PathBuf::from("firebase-service-account.json"));
        assert_eq!(config.output_path, PathBuf::from("firebase-env-output.txt"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
input_path: secrets/sa.json
output_path: out/.env
logging:
  level: debug
  format: json
  log_dir: /var/log/firebase-env
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.input_path, PathBuf::from("secrets/sa.json"));
        assert_eq!(config.output_path, PathBuf::from("out/.env"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/var/log/firebase-env"))
        );

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config: Config = serde_yaml::from_str("output_path: custom.txt\n").unwrap();
        assert_eq!(config.input_path, PathBuf::from("firebase-service-account.json"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_validate_empty_paths() {
        let config = Config {
            input_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyInputPath)
        ));

        let config = Config {
            output_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyOutputPath)
        ));
    }

    #[test]
    fn test_validate_output_equals_input() {
        let config = Config {
            input_path: PathBuf::from("creds.json"),
            output_path: PathBuf::from("creds.json"),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::OutputOverwritesInput(_))
        ));
    }

    #[test]
    fn test_validate_output_equals_input_through_dot_segment() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("creds.json");
        fs::write(&input, "{}").unwrap();
        let config = Config {
            input_path: input,
            output_path: dir.path().join(".").join("creds.json"),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::OutputOverwritesInput(_))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "input_path: a.json\noutput_path: b.txt\n").unwrap();

        temp_env::with_vars_unset(ENV_VARS, || {
            let config = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(config.input_path, PathBuf::from("a.json"));
            assert_eq!(config.output_path, PathBuf::from("b.txt"));
            assert_eq!(config.logging.level, "warn");
        });
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "output_path: from-file.txt\n").unwrap();

        temp_env::with_vars(
            [
                ("FIREBASE_ENV_INPUT_PATH", None),
                ("FIREBASE_ENV_OUTPUT_PATH", Some("from-env.txt")),
                ("FIREBASE_ENV_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load_from_file(&path).unwrap();
                assert_eq!(config.output_path, PathBuf::from("from-env.txt"));
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_env_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "input_path: same.json\n").unwrap();

        temp_env::with_vars(
            [
                ("FIREBASE_ENV_INPUT_PATH", None),
                ("FIREBASE_ENV_OUTPUT_PATH", Some("same.json")),
                ("FIREBASE_ENV_LOGGING__LEVEL", None),
            ],
            || {
                let err = ConfigLoader::load_from_file(&path).unwrap_err();
                assert!(err.downcast_ref::<ConfigError>().is_some());
            },
        );
    }

    #[test]
    fn test_extract_leaves_invalid_values_for_caller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "logging:\n  level: loud\n").unwrap();

        temp_env::with_vars_unset(ENV_VARS, || {
            let config = ConfigLoader::extract_from_file(&path).unwrap();
            assert_eq!(config.logging.level, "loud");
            assert!(ConfigLoader::load_from_file(&path).is_err());
        });
    }
}

//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "firebase-env")]
#[command(
    about = "Export a Firebase service-account credential as FIREBASE_* environment lines",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Subcommand; `export` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Service-account JSON file to read
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// File to write the export to (overwritten)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// YAML config file to use instead of .firebase-env.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Commands {
    /// Write the credential as NAME=value lines (default)
    #[default]
    Export,

    /// Check an existing export against the credential file
    Verify,
}

impl Cli {
    /// Subcommand to run; a bare invocation exports.
    pub fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }

    /// Load layered configuration and apply command-line overrides on top.
    ///
    /// Validation runs once, on the merged result, so a flag can replace a
    /// value that would be rejected on its own.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::extract_from_file(path)?,
            None => ConfigLoader::extract()?,
        };

        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }

        ConfigLoader::validate(&config)?;
        Ok(config)
    }
}

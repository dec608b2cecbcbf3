//! firebase-env - service-account credential exporter
//!
//! Reads a Firebase service-account JSON file and writes the six fields a
//! server needs as `FIREBASE_*=value` lines, with the private key's newlines
//! escaped so each variable fits on one line.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): credential record, environment export, errors
//! - **Service Layer** (`services`): the exporter itself
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use firebase_env::CredentialExporter;
//!
//! let exporter = CredentialExporter::new(
//!     "firebase-service-account.json",
//!     "firebase-env-output.txt",
//! );
//! let report = exporter.run()?;
//! println!("wrote {} variables", report.variables.len());
//! # Ok::<(), firebase_env::ExportError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    escape_newlines, unescape_newlines, Config, CredentialField, EnvExport, LoggingConfig,
    ServiceAccount,
};
pub use domain::{ExportError, ExportResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CredentialExporter, ExportReport, VerifyReport};

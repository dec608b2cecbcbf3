//! Domain models: credential, export, configuration.

pub mod config;
pub mod credential;
pub mod env_export;

pub use config::{Config, LoggingConfig};
pub use credential::ServiceAccount;
pub use env_export::{escape_newlines, unescape_newlines, CredentialField, EnvExport};

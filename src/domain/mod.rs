//! Domain layer for the credential exporter
//!
//! This module contains the credential record, the environment export it is
//! projected into, and the errors raised along the way.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::{ExportError, ExportResult};

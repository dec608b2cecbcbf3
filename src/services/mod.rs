//! Service layer.

pub mod exporter;

pub use exporter::{CredentialExporter, ExportReport, VerifyReport};

//! Implementation of the `firebase-env export` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::{CredentialExporter, ExportReport};

/// Result of `firebase-env export`
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    /// Always true; failures surface as errors
    pub success: bool,
    /// Confirmation line naming the output file
    pub message: String,
    /// What was written
    #[serde(flatten)]
    pub report: ExportReport,
}

impl CommandOutput for ExportOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Export the credential and print the confirmation.
pub fn execute(exporter: &CredentialExporter, json_mode: bool) -> Result<()> {
    let report = exporter.run().context("Credential export failed")?;

    let output_data = ExportOutput {
        success: true,
        message: format!(".env export written to {}", report.output_path.display()),
        report,
    };

    output(&output_data, json_mode);
    Ok(())
}

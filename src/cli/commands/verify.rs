//! Implementation of the `firebase-env verify` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::{CredentialExporter, VerifyReport};

/// Result of `firebase-env verify`
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    /// Export is current
    pub success: bool,
    /// Per-variable comparison
    #[serde(flatten)]
    pub report: VerifyReport,
}

impl CommandOutput for VerifyOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        for name in &self.report.matched {
            lines.push(format!("  ok       {name}"));
        }
        for name in &self.report.mismatched {
            lines.push(format!("  differs  {name}"));
        }
        for name in &self.report.missing {
            lines.push(format!("  missing  {name}"));
        }
        for name in &self.report.unexpected {
            lines.push(format!("  extra    {name}"));
        }
        if !self.report.in_order {
            lines.push("  variables are not in export order".to_string());
        }
        if !self.report.private_key_round_trip {
            lines.push("  private key does not round-trip to the credential".to_string());
        }

        let summary = if self.success {
            format!(
                "{} matches {}",
                self.report.output_path.display(),
                self.report.input_path.display()
            )
        } else {
            format!(
                "{} is out of date with {}",
                self.report.output_path.display(),
                self.report.input_path.display()
            )
        };
        lines.push(summary);
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Check the export file and fail when it is out of date.
pub fn execute(exporter: &CredentialExporter, json_mode: bool) -> Result<()> {
    let report = exporter.verify().context("Export verification failed")?;
    let clean = report.is_clean();
    let output_path = report.output_path.clone();

    output(
        &VerifyOutput {
            success: clean,
            report,
        },
        json_mode,
    );

    if !clean {
        anyhow::bail!("{} does not match the credential file", output_path.display());
    }
    Ok(())
}

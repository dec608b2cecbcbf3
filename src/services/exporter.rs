//! The credential exporter service.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{ExportError, ExportResult};
use crate::domain::models::{unescape_newlines, Config, CredentialField, EnvExport, ServiceAccount};

/// Summary of a completed export
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportReport {
    /// Credential file that was read
    pub input_path: PathBuf,
    /// Export file that was written
    pub output_path: PathBuf,
    /// Variable names, in file order
    pub variables: Vec<String>,
    /// Size of the export file
    pub bytes_written: usize,
}

/// Result of checking an existing export against its credential
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VerifyReport {
    /// Credential file the export was checked against
    pub input_path: PathBuf,
    /// Export file that was checked
    pub output_path: PathBuf,
    /// Variables whose exported value is current
    pub matched: Vec<String>,
    /// Variables present with a stale value
    pub mismatched: Vec<String>,
    /// Variables absent from the file
    pub missing: Vec<String>,
    /// Lines that do not belong: unknown names and repeats of a name
    pub unexpected: Vec<String>,
    /// The file lists the variables in export order
    pub in_order: bool,
    /// Unescaping the exported key reproduces the credential's key exactly
    pub private_key_round_trip: bool,
}

impl VerifyReport {
    /// True when the file holds exactly the variables `run` would write, in order.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
            && self.missing.is_empty()
            && self.unexpected.is_empty()
            && self.in_order
            && self.private_key_round_trip
    }
}

/// Reads a service-account file and writes it back out as `NAME=value` lines.
#[derive(Debug, Clone)]
pub struct CredentialExporter {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl CredentialExporter {
    /// Exporter reading `input_path` and writing `output_path`.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Exporter for the paths in a resolved [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.input_path, &config.output_path)
    }

    /// Credential file path
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Export file path
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Read and parse the credential file.
    pub fn load(&self) -> ExportResult<ServiceAccount> {
        let json = fs::read_to_string(&self.input_path)
            .map_err(|e| ExportError::file_not_found(&self.input_path, e))?;
        let account = ServiceAccount::from_json(&json)
            .map_err(|e| ExportError::parse_error(&self.input_path, e))?;
        debug!(path = %self.input_path.display(), account = ?account, "credential loaded");
        Ok(account)
    }

    /// Project the credential into its export, escaping the private key.
    pub fn transform(account: &ServiceAccount) -> EnvExport {
        let export = EnvExport::from_account(account);
        debug!(variables = export.len(), "credential transformed");
        export
    }

    /// Render the export as newline-terminated `NAME=value` lines.
    pub fn render(export: &EnvExport) -> String {
        export.render()
    }

    /// Write `contents` to the output path, replacing whatever was there.
    pub fn persist(&self, contents: &str) -> ExportResult<()> {
        fs::write(&self.output_path, contents)
            .map_err(|e| ExportError::file_not_found(&self.output_path, e))
    }

    /// Load, transform, render, and persist in one pass.
    ///
    /// The output file is only touched once the credential has parsed.
    #[instrument(skip(self), fields(input = %self.input_path.display(), output = %self.output_path.display()))]
    pub fn run(&self) -> ExportResult<ExportReport> {
        let account = self.load()?;
        let export = Self::transform(&account);
        let contents = Self::render(&export);
        self.persist(&contents)?;

        info!(
            variables = export.len(),
            bytes = contents.len(),
            "environment export written"
        );

        Ok(ExportReport {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            variables: export.names(),
            bytes_written: contents.len(),
        })
    }

    /// Compare the existing output file with a fresh export of the credential.
    #[instrument(skip(self), fields(input = %self.input_path.display(), output = %self.output_path.display()))]
    pub fn verify(&self) -> ExportResult<VerifyReport> {
        let account = self.load()?;
        let expected = Self::transform(&account);

        let text = fs::read_to_string(&self.output_path)
            .map_err(|e| ExportError::file_not_found(&self.output_path, e))?;
        let actual = EnvExport::parse(&text, &self.output_path)?;
        if actual.is_empty() {
            warn!(path = %self.output_path.display(), "export file has no variables");
        }

        let mut matched = Vec::new();
        let mut mismatched = Vec::new();
        let mut missing = Vec::new();
        for (name, value) in expected.entries() {
            match actual.get(name) {
                Some(found) if found == value => matched.push(name.clone()),
                Some(_) => mismatched.push(name.clone()),
                None => missing.push(name.clone()),
            }
        }

        let expected_names = expected.names();
        let mut seen = Vec::new();
        let mut unexpected = Vec::new();
        for (name, _) in actual.entries() {
            if !expected_names.contains(name) || seen.contains(name) {
                unexpected.push(name.clone());
            } else {
                seen.push(name.clone());
            }
        }
        let in_order = actual.names() == expected_names;

        let private_key_round_trip = actual
            .get(CredentialField::PrivateKey.env_name())
            .is_some_and(|value| unescape_newlines(value) == account.private_key);

        let report = VerifyReport {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            matched,
            mismatched,
            missing,
            unexpected,
            in_order,
            private_key_round_trip,
        };
        info!(clean = report.is_clean(), "export verified");
        Ok(report)
    }
}

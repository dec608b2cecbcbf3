//! Environment export: the ordered `NAME=value` projection of a credential.

use std::fmt;
use std::path::Path;

use crate::domain::errors::{ExportError, ExportResult};

use super::credential::ServiceAccount;

/// A credential field and the environment variable it is exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// `project_id` as `FIREBASE_PROJECT_ID`
    ProjectId,
    /// `private_key_id` as `FIREBASE_PRIVATE_KEY_ID`
    PrivateKeyId,
    /// `private_key` as `FIREBASE_PRIVATE_KEY`, newlines escaped
    PrivateKey,
    /// `client_email` as `FIREBASE_CLIENT_EMAIL`
    ClientEmail,
    /// `client_id` as `FIREBASE_CLIENT_ID`
    ClientId,
    /// `client_x509_cert_url` as `FIREBASE_CLIENT_CERT_URL`
    ClientCertUrl,
}

impl CredentialField {
    /// Every exported field, in output order.
    pub const ALL: [Self; 6] = [
        Self::ProjectId,
        Self::PrivateKeyId,
        Self::PrivateKey,
        Self::ClientEmail,
        Self::ClientId,
        Self::ClientCertUrl,
    ];

    /// Environment variable name
    pub const fn env_name(self) -> &'static str {
        match self {
            Self::ProjectId => "FIREBASE_PROJECT_ID",
            Self::PrivateKeyId => "FIREBASE_PRIVATE_KEY_ID",
            Self::PrivateKey => "FIREBASE_PRIVATE_KEY",
            Self::ClientEmail => "FIREBASE_CLIENT_EMAIL",
            Self::ClientId => "FIREBASE_CLIENT_ID",
            Self::ClientCertUrl => "FIREBASE_CLIENT_CERT_URL",
        }
    }

    /// Raw field value, before any escaping.
    pub fn value(self, account: &ServiceAccount) -> &str {
        match self {
            Self::ProjectId => &account.project_id,
            Self::PrivateKeyId => &account.private_key_id,
            Self::PrivateKey => &account.private_key,
            Self::ClientEmail => &account.client_email,
            Self::ClientId => &account.client_id,
            Self::ClientCertUrl => &account.client_x509_cert_url,
        }
    }

    /// Value as it appears in the export file.
    pub fn exported_value(self, account: &ServiceAccount) -> String {
        match self {
            Self::PrivateKey => escape_newlines(self.value(account)),
            _ => self.value(account).to_string(),
        }
    }
}

/// Replace every newline with the two-character sequence `\n`.
pub fn escape_newlines(value: &str) -> String {
    value.replace('\n', "\\n")
}

/// Inverse of [`escape_newlines`].
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Ordered environment variable mapping.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EnvExport {
    entries: Vec<(String, String)>,
}

impl EnvExport {
    /// Project a credential into its six exported variables.
    pub fn from_account(account: &ServiceAccount) -> Self {
        let entries = CredentialField::ALL
            .iter()
            .map(|field| {
                (
                    field.env_name().to_string(),
                    field.exported_value(account),
                )
            })
            .collect();
        Self { entries }
    }

    /// Parse previously rendered export text.
    ///
    /// Blank lines are skipped. Every other line is split at its first `=`;
    /// `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> ExportResult<Self> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (name, value) = line.split_once('=').ok_or_else(|| ExportError::InvalidExportLine {
                path: path.to_path_buf(),
                line: index + 1,
            })?;
            entries.push((name.to_string(), value.to_string()));
        }
        Ok(Self { entries })
    }

    /// Entries in file order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Variable names in file order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// First value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of entries, repeats included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one newline-terminated `NAME=value` line per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={value}\n"))
            .collect()
    }
}

// Values are withheld so a stray `?export` in a log line cannot leak the key.
impl fmt::Debug for EnvExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvExport")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

//! Service-account credential record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Service-account credential as issued by the cloud identity provider.
///
/// Only the fields that end up in the environment export are kept; any other
/// keys in the JSON document (`type`, `auth_uri`, `token_uri`, ...) are ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    /// Owning project
    pub project_id: String,
    /// Key identifier
    pub private_key_id: String,
    /// PEM text with real newlines
    pub private_key: String,
    /// Service account address
    pub client_email: String,
    /// Numeric client id, kept as text
    pub client_id: String,
    /// Public certificate URL
    pub client_x509_cert_url: String,
}

impl ServiceAccount {
    /// Parse a credential from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[REDACTED]")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("client_x509_cert_url", &self.client_x509_cert_url)
            .finish()
    }
}

//! Domain errors for the credential exporter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, exporting, or verifying a credential.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input could not be read, or the output could not be written.
    #[error("File not found or not accessible: {}", path.display())]
    FileNotFound {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The input is not valid JSON, lacks a required field, or holds a
    /// non-string value.
    #[error("Failed to parse credential file {}: {source}", path.display())]
    ParseError {
        /// Credential file being parsed
        path: PathBuf,
        /// Underlying decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// An export file line has no `=`.
    #[error("Malformed line {line} in {}: expected NAME=value", path.display())]
    InvalidExportLine {
        /// Export file being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
    },
}

impl ExportError {
    /// Wrap an I/O failure on `path`.
    pub fn file_not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileNotFound {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON decoding failure on `path`.
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseError {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for exporter operations
pub type ExportResult<T> = Result<T, ExportError>;

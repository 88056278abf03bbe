//! Error types for charstore.
//!
//! This module defines all error types used throughout the charstore crate.
//! "Not found" is deliberately absent: lookups and mutations on a missing id
//! return `Ok(None)` or `Ok(false)` instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for charstore operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Data File Errors ===
    /// Failed to read the backing data file.
    #[error("failed to read data file {path}: {source}")]
    FileRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the backing data file.
    #[error("failed to write data file {path}: {source}")]
    FileWrite {
        /// Path that was being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// A data line could not be decoded into a record.
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number within the file (0 when decoded standalone).
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// A user-supplied value could not be coerced into its field type.
    #[error("invalid value for {field}: {message}")]
    InvalidInput {
        /// Name of the field being coerced.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The id space is used up and no new record can be created.
    #[error("no identifiers left: the highest id is already {max}")]
    IdExhausted {
        /// The current highest id in the store.
        max: u32,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for charstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a malformed line error.
    #[must_use]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error for the named field.
    #[must_use]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Check if this error means the data file does not exist yet.
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            Self::FileRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Check if this error is an input coercion failure.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

//! Error types for feedbackhub.
//!
//! This module defines all error types used throughout the feedbackhub crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for feedbackhub operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read the feedback CSV file.
    #[error("failed to read feedback file {path}: {source}")]
    CsvRead {
        /// Path to the CSV file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write the feedback CSV file.
    #[error("failed to write feedback file {path}: {source}")]
    CsvWrite {
        /// Path to the CSV file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// The CSV file is missing a required column.
    #[error("CSV file does not contain a '{column}' column")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// No feedback has been stored yet (missing or empty table).
    #[error("feedback data not found or is empty")]
    NoFeedback,

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

    // === Question Answering Errors ===
    /// The request to the question answering backend failed.
    #[error("question answering request failed: {0}")]
    QaRequest(#[from] reqwest::Error),

    /// The question answering backend returned a non-success status.
    #[error("question answering backend returned {status}: {body}")]
    QaBackend {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The question answering backend returned a blank answer.
    #[error("question answering backend returned an empty answer")]
    QaEmptyAnswer,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for feedbackhub operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a question answering backend error.
    #[must_use]
    pub fn qa_backend(status: u16, body: impl Into<String>) -> Self {
        Self::QaBackend {
            status,
            body: body.into(),
        }
    }

    /// Check if this error indicates the feedback table is missing or empty.
    #[must_use]
    pub fn is_no_feedback(&self) -> bool {
        matches!(self, Self::NoFeedback)
    }

    /// Check if this error came from the question answering backend.
    #[must_use]
    pub fn is_qa_error(&self) -> bool {
        matches!(
            self,
            Self::QaRequest(_) | Self::QaBackend { .. } | Self::QaEmptyAnswer
        )
    }
}

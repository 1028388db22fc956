//! Error type shared by every stage of a generation run.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a generation run.
///
/// Every variant is terminal: the orchestrator never retries and never
/// recovers, it only reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or empty.
    #[error("{0}")]
    Config(String),

    /// A file or directory could not be read, created or written.
    #[error("{message}: {}", path.display())]
    Io {
        /// What was being attempted.
        message: String,
        /// Absolute path involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Absolute path of the data file.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// The data file parsed but has the wrong shape.
    #[error("{0}")]
    Schema(String),

    /// A document is missing a required field.
    #[error("Document {index}: {field} is required in document data")]
    Validation {
        /// 0-based position of the document in the input array.
        index: usize,
        /// Capitalized field name (`Title`, `Description`, `Path`).
        field: &'static str,
    },

    /// The external template lacks one or more placeholders.
    #[error("Invalid template: missing required variables: {}", missing.join(", "))]
    Template {
        /// Missing placeholder names, without braces, in canonical order.
        missing: Vec<&'static str>,
    },

    /// A parallel render/write task panicked or was cancelled.
    #[error("Page task failed: {0}")]
    Task(String),
}

/// Coarse discriminant of [`Error`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::Config`].
    Config,
    /// See [`Error::Io`].
    Io,
    /// See [`Error::Parse`].
    Parse,
    /// See [`Error::Schema`].
    Schema,
    /// See [`Error::Validation`].
    Validation,
    /// See [`Error::Template`].
    Template,
    /// See [`Error::Task`].
    Task,
}

impl Error {
    /// Builds an [`Error::Io`] from a failed operation on `path`.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Schema(_) => ErrorKind::Schema,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Template { .. } => ErrorKind::Template,
            Self::Task(_) => ErrorKind::Task,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

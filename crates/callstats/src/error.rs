//! Error types for callstats.
//!
//! This module defines all error types used throughout the callstats crate.
//! Every store error is recoverable: the console layer reports it and returns
//! to the menu.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for callstats operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// An add was attempted while the store already holds `capacity` records.
    #[error("store is full ({capacity} records); new call record not added")]
    StoreFull {
        /// Maximum number of records the store can hold.
        capacity: usize,
    },

    /// The operation needs at least one record but the store is empty.
    #[error("the store is empty")]
    EmptyStore,

    /// No record carries the requested phone number.
    #[error("{phone_number} is not in the store")]
    NotFound {
        /// The phone number that was looked up.
        phone_number: String,
    },

    /// A bulk load would push the store past its capacity.
    #[error("cannot load {requested} records: only {available} of {capacity} slots free")]
    CapacityExceeded {
        /// Maximum number of records the store can hold.
        capacity: usize,
        /// Free slots at the time of the load.
        available: usize,
        /// Number of records found in the source.
        requested: usize,
    },

    // === Data File Errors ===
    /// Failed to open an input data file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output data file.
    #[error("failed to create {path}: {source}")]
    FileCreate {
        /// Path to the output file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The input data is malformed.
    #[error("malformed call data on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending token.
        line: usize,
        /// Description of what went wrong.
        message: String,
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
    /// File system or console operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for callstats operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given phone number.
    #[must_use]
    pub fn not_found(phone_number: impl Into<String>) -> Self {
        Self::NotFound {
            phone_number: phone_number.into(),
        }
    }

    /// Create a parse error for the given line.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Check if this error indicates the store is at capacity.
    #[must_use]
    pub fn is_store_full(&self) -> bool {
        matches!(self, Self::StoreFull { .. })
    }

    /// Check if this error indicates the store holds no records.
    #[must_use]
    pub fn is_empty_store(&self) -> bool {
        matches!(self, Self::EmptyStore)
    }

    /// Check if this error indicates the phone number was not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

//! Error types for the table sink
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Expectation reported when a record's value cannot be turned into cells
pub const COLUMN_DATA_EXPECTATION: &str =
    "expected family→qualifier→value mapping of encodable scalars";

/// The main error type for the table sink
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Must specify table name ('{key}' is not set)")]
    MissingTableName { key: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Encoding Errors
    // ============================================================================
    #[error("Unsupported scalar type: {type_name}")]
    UnsupportedScalarType { type_name: &'static str },

    #[error("Unexpected value type: expected {expected}, found {found}")]
    UnexpectedValueType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Failed to decode cell bytes: {message}")]
    Decode { message: String },

    #[error("Malformed typed bytes at offset {offset}: {message}")]
    TypedBytes { offset: usize, message: String },

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("Invalid key, expecting an encodable scalar: {source}")]
    InvalidKey {
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid column data, {expected}: {source}")]
    InvalidColumnData {
        expected: &'static str,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Failed to open table '{table}': {message}")]
    StoreConnection { table: String, message: String },

    #[error("Store write failed: {message}")]
    StoreWriteFailure { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing table name error for the given config key
    pub fn missing_table(key: impl Into<String>) -> Self {
        Self::MissingTableName { key: key.into() }
    }

    /// Create an unsupported scalar type error
    pub fn unsupported(type_name: &'static str) -> Self {
        Self::UnsupportedScalarType { type_name }
    }

    /// Wrap a cause as an invalid key error
    pub fn invalid_key(source: Error) -> Self {
        Self::InvalidKey {
            source: Box::new(source),
        }
    }

    /// Wrap a cause as an invalid column data error
    pub fn invalid_column_data(source: Error) -> Self {
        Self::InvalidColumnData {
            expected: COLUMN_DATA_EXPECTATION,
            source: Box::new(source),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a typed bytes error at the given input offset
    pub fn typed_bytes(offset: usize, message: impl Into<String>) -> Self {
        Self::TypedBytes {
            offset,
            message: message.into(),
        }
    }

    /// Create a store connection error
    pub fn store_connection(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreConnection {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a store write error
    pub fn store_write(message: impl Into<String>) -> Self {
        Self::StoreWriteFailure {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the contents of a single record
    ///
    /// Record errors are data-contract violations. They still fail the task;
    /// the classification only tells the caller where to look.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidKey { .. }
                | Error::InvalidColumnData { .. }
                | Error::UnsupportedScalarType { .. }
                | Error::UnexpectedValueType { .. }
        )
    }
}

/// Result type alias for the table sink
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

//! Error types for vector ingestion

use std::io;
use thiserror::Error;

/// Result type for vector ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vector ingestion operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Buffer shape does not match the declared capacity and dimension
    #[error("Memory layout error: {0}")]
    LayoutError(String),

    /// Row index past the matrix capacity
    #[error("Row {index} out of bounds for capacity {capacity}")]
    RowOutOfBounds {
        /// Requested row
        index: usize,
        /// Matrix capacity
        capacity: usize,
    },
}

/// A record whose byte length cannot be reinterpreted as one vector.
///
/// This is a per-record condition: the pipeline skips the record and keeps
/// going, so it is reported through diagnostics rather than [`Error`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Array size is {actual} bytes, does not match {expected}")]
pub struct ConversionError {
    /// Required byte length (`4 * dimension`)
    pub expected: usize,
    /// Byte length of the record
    pub actual: usize,
}

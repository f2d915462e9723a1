//! Error types for record readers

use std::io;

use thiserror::Error;

/// Error type for record readers
#[derive(Error, Debug)]
pub enum Error {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] vec_ingest_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record stream ended on a framing problem
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for record readers
pub type Result<T> = std::result::Result<T, Error>;

/// A problem decoding the length-prefixed framing of a record stream.
///
/// Readers never yield a partial record; they stop at the first framing
/// problem and keep it as their [`StreamEnd`](crate::StreamEnd).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// The stream ended inside a frame header or payload
    #[error("stream ends inside the record starting at byte {offset}")]
    Truncated {
        /// Byte offset of the incomplete frame
        offset: u64,
    },

    /// The value at `offset` is not a binary payload
    #[error("expected a bin value at byte {offset}, found marker {marker}")]
    UnexpectedMarker {
        /// Byte offset of the frame
        offset: u64,
        /// Debug rendering of the marker that was found
        marker: String,
    },

    /// Declared payload length beyond the configured maximum
    #[error("record at byte {offset} declares {len} bytes, limit is {limit}")]
    RecordTooLarge {
        /// Byte offset of the frame
        offset: u64,
        /// Declared payload length
        len: u32,
        /// Configured maximum
        limit: u32,
    },

    /// The underlying stream failed
    #[error("I/O error at byte {offset}: {kind}")]
    Io {
        /// Byte offset of the frame being read
        offset: u64,
        /// Kind of the I/O failure
        kind: io::ErrorKind,
    },
}

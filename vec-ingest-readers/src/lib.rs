//! Record stream readers for vector ingestion
//!
//! This crate turns container files into lazy sequences of opaque records
//! that the `vec-ingest-core` pipeline drains into an output matrix.

mod error;

pub mod common;
pub mod msgpack;
pub mod source;

pub use common::{BinaryRecord, ReaderOptions};
pub use error::{Error, FramingError, Result};
pub use msgpack::{MsgpackRecordReader, MsgpackRecordWriter, StreamEnd};
pub use source::{ingest_file, ingest_file_detailed, MsgpackFileSource};

// Re-export core types
pub use vec_ingest_core::{
    ingest, IngestConfig, IngestReport, RecordSourceFactory, StopReason, VectorMatrix,
    VectorMatrixMut,
};

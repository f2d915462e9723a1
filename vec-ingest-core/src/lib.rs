//! Core types and the streaming vector ingestion pipeline
//!
//! This crate turns a sequence of opaque byte records into rows of a
//! preallocated `f32` matrix. It knows nothing about where the records come
//! from; see the `vec-ingest-readers` crate for file-backed sources.
//!
//! ```
//! use vec_ingest_core::{ingest, IngestConfig};
//!
//! let config = IngestConfig::new(2, 8);
//! let mut matrix = config.allocate().unwrap();
//! let records = vec![bytemuck::cast_slice(&[1.0f32, 2.0]).to_vec()];
//!
//! let count = ingest(&records, &mut matrix.view_mut());
//! assert_eq!(count, 1);
//! assert_eq!(matrix.row(0), Some(&[1.0f32, 2.0][..]));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod ingest;
pub mod matrix;
pub mod source;

// Re-export key types for convenience
pub use config::IngestConfig;
pub use convert::{copy_vector, F32_SIZE};
pub use diagnostics::{DiagnosticSink, NullDiagnostics, SkippedRecord, TracingDiagnostics};
pub use error::{ConversionError, Error, Result};
pub use ingest::{ingest, CopyIngestor, IngestReport, StopReason, VectorIngestor};
pub use matrix::{VectorMatrix, VectorMatrixMut};
pub use source::RecordSourceFactory;

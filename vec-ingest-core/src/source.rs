//! Record source factories
//!
//! A factory can be opened any number of times; each [`open`] call yields a
//! fresh, forward-only record sequence. A sequence itself cannot be replayed.
//!
//! [`open`]: RecordSourceFactory::open

use crate::diagnostics::TracingDiagnostics;
use crate::ingest::{CopyIngestor, IngestReport, VectorIngestor};
use crate::matrix::VectorMatrixMut;

/// A restartable producer of record sequences
pub trait RecordSourceFactory: Send + Sync {
    /// Item yielded by each sequence
    type Record: AsRef<[u8]>;

    /// The sequence type produced by [`RecordSourceFactory::open`]
    type Source: Iterator<Item = Self::Record>;

    /// Error raised when a sequence cannot be opened at all
    type Error;

    /// Open a new sequence positioned at the first record
    fn open(&self) -> Result<Self::Source, Self::Error>;

    /// Open a new sequence and ingest it into `output` with the reference
    /// decode path.
    ///
    /// Only a failure to open is returned as an error. Problems inside the
    /// stream shorten the sequence and show up in the report.
    fn ingest_into(&self, output: &mut VectorMatrixMut<'_>) -> Result<IngestReport, Self::Error> {
        let source = self.open()?;
        Ok(CopyIngestor.ingest_detailed(source, output, &mut TracingDiagnostics))
    }
}

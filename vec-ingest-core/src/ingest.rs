//! The vector ingestion pipeline
//!
//! Drains a sequence of opaque byte records into a preallocated
//! [`VectorMatrixMut`], one row per record whose length is exactly
//! `4 * dimension` bytes. Records of any other length are reported to a
//! [`DiagnosticSink`] and skipped. Rows are packed densely from row 0 in
//! stream order.
//!
//! Per invocation the pipeline moves through
//! `READING -> (CONVERTING -> {WRITE_OK | SKIP_INVALID})*` and ends in one of
//! the two [`StopReason`]s. Neither terminal state is an error.

use tracing::debug;

use crate::convert::copy_vector;
use crate::diagnostics::{DiagnosticSink, SkippedRecord, TracingDiagnostics};
use crate::matrix::VectorMatrixMut;

/// Why an ingestion run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The record sequence ran out
    Exhausted,
    /// Every row of the output matrix was written; remaining records were
    /// not pulled from the sequence
    CapacityReached,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Rows written, `0 <= count <= capacity`
    pub count: usize,
    /// Records rejected for their length
    pub skipped: usize,
    /// Terminal state of the run
    pub stop: StopReason,
}

/// A decode path from byte records into an output matrix.
///
/// Implementations must honor the same contract: stop before pulling a record
/// once the matrix is full, skip and report records of the wrong length, and
/// never touch rows at or past the returned count.
pub trait VectorIngestor {
    /// Ingest `records` into `output`, reporting skipped records to `sink`
    fn ingest_detailed<I, S>(
        &self,
        records: I,
        output: &mut VectorMatrixMut<'_>,
        sink: &mut S,
    ) -> IngestReport
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
        S: DiagnosticSink + ?Sized;

    /// Ingest `records` into `output`, logging skipped records, and return
    /// the number of rows written
    fn ingest<I>(&self, records: I, output: &mut VectorMatrixMut<'_>) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.ingest_detailed(records, output, &mut TracingDiagnostics)
            .count
    }
}

/// Reference decode path: a bounds-checked byte copy per row
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyIngestor;

impl VectorIngestor for CopyIngestor {
    fn ingest_detailed<I, S>(
        &self,
        records: I,
        output: &mut VectorMatrixMut<'_>,
        sink: &mut S,
    ) -> IngestReport
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
        S: DiagnosticSink + ?Sized,
    {
        let capacity = output.capacity();
        let mut records = records.into_iter();
        let mut count = 0;
        let mut skipped = 0;
        let mut position = 0;

        let stop = loop {
            if count >= capacity {
                break StopReason::CapacityReached;
            }
            let Some(record) = records.next() else {
                break StopReason::Exhausted;
            };
            let Ok(row) = output.row_mut(count) else {
                break StopReason::CapacityReached;
            };

            match copy_vector(record.as_ref(), row) {
                Ok(()) => count += 1,
                Err(error) => {
                    skipped += 1;
                    sink.on_skipped(SkippedRecord { position, error });
                }
            }
            position += 1;
        };

        debug!(count, skipped, capacity, ?stop, "Ingestion finished");

        IngestReport {
            count,
            skipped,
            stop,
        }
    }
}

/// Ingest `records` into `output` with the reference decode path
pub fn ingest<I>(records: I, output: &mut VectorMatrixMut<'_>) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    CopyIngestor.ingest(records, output)
}

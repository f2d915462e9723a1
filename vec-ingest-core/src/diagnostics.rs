//! Fire-and-forget reporting of skipped records

use tracing::warn;

use crate::error::ConversionError;

/// A record the pipeline could not convert and left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the input stream
    pub position: usize,
    /// Why the record was rejected
    pub error: ConversionError,
}

/// Receiver for per-record diagnostics.
///
/// Sinks must not influence ingestion; the pipeline calls them and moves on.
pub trait DiagnosticSink {
    /// Called once for every skipped record, in stream order
    fn on_skipped(&mut self, record: SkippedRecord);
}

/// Default sink: one `warn` event per skipped record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn on_skipped(&mut self, record: SkippedRecord) {
        warn!(
            position = record.position,
            expected = record.error.expected,
            actual = record.error.actual,
            "Error: {}. Skipping record {}",
            record.error,
            record.position
        );
    }
}

/// Discards every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl DiagnosticSink for NullDiagnostics {
    fn on_skipped(&mut self, _record: SkippedRecord) {}
}

impl DiagnosticSink for Vec<SkippedRecord> {
    fn on_skipped(&mut self, record: SkippedRecord) {
        self.push(record);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn on_skipped(&mut self, record: SkippedRecord) {
        (**self).on_skipped(record);
    }
}

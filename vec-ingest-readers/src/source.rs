//! File-backed record sources

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;
use vec_ingest_core::{IngestReport, RecordSourceFactory, VectorMatrixMut};

use crate::common::{BinaryRecord, ReaderOptions};
use crate::error::{Error, Result};
use crate::msgpack::MsgpackRecordReader;

/// A MessagePack container file that can be opened any number of times
#[derive(Debug, Clone)]
pub struct MsgpackFileSource {
    path: PathBuf,
    options: ReaderOptions,
}

impl MsgpackFileSource {
    /// Source for the file at `path` with default reader options
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: ReaderOptions::default(),
        }
    }

    /// Replace the reader options
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Path of the container file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reader options used by every sequence this source opens
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }
}

impl RecordSourceFactory for MsgpackFileSource {
    type Record = BinaryRecord;
    type Source = MsgpackRecordReader<BufReader<File>>;
    type Error = Error;

    fn open(&self) -> Result<Self::Source> {
        MsgpackRecordReader::open(&self.path, &self.options)
    }
}

/// Ingest every record of the container file at `path` into `output`.
///
/// Failing to open the file is the only error. Framing problems inside the
/// file end the stream early and are logged; records of the wrong length are
/// skipped and logged. Returns the number of rows written.
pub fn ingest_file<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
    output: &mut VectorMatrixMut<'_>,
) -> Result<usize> {
    ingest_file_detailed(path, options, output).map(|report| report.count)
}

/// [`ingest_file`], returning the full ingestion report
pub fn ingest_file_detailed<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
    output: &mut VectorMatrixMut<'_>,
) -> Result<IngestReport> {
    let source = MsgpackFileSource::new(path).with_options(options.clone());
    let report = source.ingest_into(output)?;
    debug!(
        path = %source.path().display(),
        count = report.count,
        skipped = report.skipped,
        "Ingested container file"
    );
    Ok(report)
}

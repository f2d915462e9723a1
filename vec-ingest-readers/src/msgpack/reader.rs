//! Streaming reader for files of MessagePack `bin` values

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use rmp::decode::ValueReadError;
use tracing::{debug, warn};

use crate::common::{BinaryRecord, ReaderOptions};
use crate::error::{Error, FramingError, Result};

/// How a record stream ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// The stream was exhausted exactly at a frame boundary
    Clean,
    /// The stream stopped early on a framing problem
    Framing(FramingError),
}

impl StreamEnd {
    /// Whether the stream ended at a frame boundary
    pub fn is_clean(&self) -> bool {
        matches!(self, StreamEnd::Clean)
    }
}

/// Byte-counting wrapper so frame offsets can be reported
struct CountingReader<'a, R> {
    inner: &'a mut R,
    position: &'a mut u64,
}

impl<R: Read> Read for CountingReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        *self.position += n as u64;
        Ok(n)
    }
}

/// Lazy, forward-only sequence of records stored as MessagePack `bin` values.
///
/// The reader owns its stream and drops it as soon as the sequence ends,
/// cleanly or not, or when the reader itself is dropped. It yields one
/// [`BinaryRecord`] per frame and stops at the first framing problem without
/// yielding a partial record; [`stream_end`](Self::stream_end) tells a clean
/// end from an early one. Once finished, `next` keeps returning `None`.
#[derive(Debug)]
pub struct MsgpackRecordReader<R> {
    // `None` once the sequence has ended
    stream: Option<R>,
    position: u64,
    max_record_len: u32,
    records_read: usize,
    end: Option<StreamEnd>,
}

impl MsgpackRecordReader<BufReader<File>> {
    /// Open a container file for reading
    pub fn open<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "Opened record stream");
        Ok(Self::new(
            BufReader::with_capacity(options.buffer_size, file),
            options,
        ))
    }
}

impl<R: Read> MsgpackRecordReader<R> {
    /// Read records from `reader`, positioned at the first frame
    pub fn new(reader: R, options: &ReaderOptions) -> Self {
        Self {
            stream: Some(reader),
            position: 0,
            max_record_len: options.max_record_len,
            records_read: 0,
            end: None,
        }
    }

    /// Number of records yielded so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Number of bytes consumed from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.position
    }

    /// Whether the underlying stream is still held
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// How the stream ended, or `None` while records may remain
    pub fn stream_end(&self) -> Option<&StreamEnd> {
        self.end.as_ref()
    }

    /// Drain the remaining records and fail if the stream did not end at a
    /// frame boundary. Returns the total number of records read.
    pub fn finish(mut self) -> Result<usize> {
        for _ in self.by_ref() {}
        match self.end {
            Some(StreamEnd::Framing(err)) => Err(Error::Framing(err)),
            _ => Ok(self.records_read),
        }
    }

    /// Decode one frame at the current position
    fn read_record(&mut self) -> std::result::Result<Option<BinaryRecord>, FramingError> {
        let offset = self.position;
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };
        let mut reader = CountingReader {
            inner: stream,
            position: &mut self.position,
        };

        let len = match rmp::decode::read_bin_len(&mut reader) {
            Ok(len) => len,
            Err(ValueReadError::InvalidMarkerRead(e))
                if e.kind() == io::ErrorKind::UnexpectedEof && *reader.position == offset =>
            {
                return Ok(None);
            }
            Err(ValueReadError::InvalidMarkerRead(e) | ValueReadError::InvalidDataRead(e)) => {
                return Err(match e.kind() {
                    io::ErrorKind::UnexpectedEof => FramingError::Truncated { offset },
                    kind => FramingError::Io { offset, kind },
                });
            }
            Err(ValueReadError::TypeMismatch(marker)) => {
                return Err(FramingError::UnexpectedMarker {
                    offset,
                    marker: format!("{marker:?}"),
                });
            }
        };

        if len > self.max_record_len {
            return Err(FramingError::RecordTooLarge {
                offset,
                len,
                limit: self.max_record_len,
            });
        }

        let mut data = Vec::with_capacity(len as usize);
        (&mut reader)
            .take(u64::from(len))
            .read_to_end(&mut data)
            .map_err(|e| FramingError::Io {
                offset,
                kind: e.kind(),
            })?;
        if data.len() < len as usize {
            return Err(FramingError::Truncated { offset });
        }

        Ok(Some(BinaryRecord {
            index: self.records_read,
            offset,
            data,
        }))
    }
}

impl<R: Read> Iterator for MsgpackRecordReader<R> {
    type Item = BinaryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => {
                self.records_read += 1;
                Some(record)
            }
            Ok(None) => {
                debug!(
                    records = self.records_read,
                    bytes = self.position,
                    "Record stream exhausted"
                );
                self.close(StreamEnd::Clean);
                None
            }
            Err(err) => {
                warn!(
                    records = self.records_read,
                    bytes = self.position,
                    "Record stream ended early: {}",
                    err
                );
                self.close(StreamEnd::Framing(err));
                None
            }
        }
    }
}

impl<R> MsgpackRecordReader<R> {
    fn close(&mut self, end: StreamEnd) {
        self.stream = None;
        self.end = Some(end);
    }
}

impl<R: Read> std::iter::FusedIterator for MsgpackRecordReader<R> {}

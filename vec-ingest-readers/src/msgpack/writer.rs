//! Writer producing files of MessagePack `bin` values

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rmp::encode::ValueWriteError;

use crate::error::{Error, Result};

/// Appends records to a stream as MessagePack `bin` values
#[derive(Debug)]
pub struct MsgpackRecordWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl MsgpackRecordWriter<BufWriter<File>> {
    /// Create (or truncate) a container file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MsgpackRecordWriter<W> {
    /// Write records to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Append one opaque record
    pub fn write_record(&mut self, data: &[u8]) -> Result<()> {
        if u32::try_from(data.len()).is_err() {
            return Err(Error::InvalidArgument(format!(
                "record of {} bytes does not fit a bin32 frame",
                data.len()
            )));
        }

        rmp::encode::write_bin(&mut self.writer, data).map_err(|e| match e {
            ValueWriteError::InvalidMarkerWrite(e) | ValueWriteError::InvalidDataWrite(e) => {
                Error::Io(e)
            }
        })?;
        self.records_written += 1;
        Ok(())
    }

    /// Append one vector as its native-endian `f32` bytes
    pub fn write_vector(&mut self, vector: &[f32]) -> Result<()> {
        self.write_record(bytemuck::cast_slice(vector))
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

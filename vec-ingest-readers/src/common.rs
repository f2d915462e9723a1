//! Options and record types shared by readers

use serde::{Deserialize, Serialize};

/// Options for record readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Buffer size for I/O operations
    pub buffer_size: usize,

    /// Largest payload a single record may declare.
    ///
    /// Frames declaring more are treated as corrupt, so a damaged length
    /// prefix cannot trigger a huge allocation.
    pub max_record_len: u32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB
            max_record_len: 64 << 20, // 64MB
        }
    }
}

impl ReaderOptions {
    /// Set the I/O buffer size
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the largest accepted record payload
    pub fn with_max_record_len(mut self, max_record_len: u32) -> Self {
        self.max_record_len = max_record_len;
        self
    }
}

/// One opaque record pulled from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRecord {
    /// Zero-based ordinal of the record in its stream
    pub index: usize,

    /// Byte offset of the record's frame header
    pub offset: u64,

    /// Record payload, verbatim
    pub data: Vec<u8>,
}

impl BinaryRecord {
    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for BinaryRecord {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

//! MessagePack record streams
//!
//! A container file is a plain concatenation of MessagePack `bin` values, one
//! per record, as produced by `msgpack.pack(vector.tobytes(), f)` in a loop.
//! Only the `bin8`/`bin16`/`bin32` framing is interpreted; payloads are passed
//! through verbatim.

mod reader;
mod writer;

pub use reader::{MsgpackRecordReader, StreamEnd};
pub use writer::MsgpackRecordWriter;

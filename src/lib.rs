//! Forward-only FASTA record reader.
//!
//! - Plain and `.gz` (auto-detect).
//! - Pull parser: one record per call, one byte of pushback at record boundaries.
//! - Bounded buffers: header and sequence overflow are reported, not grown into.
//! - Numeric id taken from the first `|`-delimited field of the header.
//! - Any parse error is fatal for the input; long lines only warn.
//! - Optional `mmap` for plain files; `zlib` feature for system-zlib parity.

pub mod error;
pub mod parser;
pub mod policy;
pub mod reader;
pub mod record;
pub mod stream;
mod util;

pub use crate::error::{EofPoint, FastaError, FormatError, IoContext, OptionsError};
pub use crate::parser::{ReaderStats, RecordParser, extract_id};
pub use crate::policy::{MarkerCheck, ReaderOptions};
pub use crate::reader::{FastaReader, Source};
pub use crate::record::{FastaRecord, NO_ID};
pub use crate::stream::{ByteStream, PushbackStream};

use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

/// Where inside a record the stream ran dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EofPoint {
    MidHeader,
    BeforeSequence,
    MidSequence,
}

impl fmt::Display for EofPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EofPoint::MidHeader => "mid-header",
            EofPoint::BeforeSequence => "before sequence",
            EofPoint::MidSequence => "mid-sequence",
        })
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected EOF {0}")]
    UnexpectedEof(EofPoint),
    #[error("description line longer than {limit} bytes")]
    HeaderTooLong { limit: usize },
    #[error("sequence overflows buffer of {capacity} bytes")]
    SequenceOverflow { capacity: usize },
    #[error("expected record marker '>' but found {found:#04x}")]
    BadMarker { found: u8 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("max_description_len must be at least 2 (marker and terminator), got {0}")]
    DescriptionTooShort(usize),
    #[error("scratch buffer ({buffer} bytes) cannot hold a {description} byte description line")]
    BufferTooSmall { buffer: usize, description: usize },
    #[error("sequence_capacity {0} leaves no room for the reserved scratch bytes")]
    CapacityOverflow(usize),
    #[error("recommended_line_len must be non-zero")]
    ZeroLineLength,
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
    #[error("invalid reader options: {0}")]
    Options(#[from] OptionsError),
}

impl FastaError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    /// The format error behind this failure, if it was one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}

//! Single-record pull parser.
//!
//! Each [`RecordParser::parse_next`] call consumes exactly one record from a
//! [`ByteStream`]: a header line, then sequence lines up to the next `>` (which
//! is pushed back for the following call) or end of input.

use crate::error::{EofPoint, FastaError, FormatError};
use crate::policy::{MarkerCheck, ReaderOptions, SCRATCH_LEN};
use crate::record::{FastaRecord, NO_ID};
use crate::stream::ByteStream;

pub const RECORD_MARKER: u8 = b'>';
pub const ID_SEPARATOR: u8 = b'|';

/// Running totals kept across records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub records: u64,
    /// Header and sequence lines consumed by successfully parsed records.
    pub lines: u64,
    /// Sequence lines of successfully parsed records whose residue count
    /// (terminator excluded) reaches the recommended length. A record that
    /// fails still logs its warnings but adds nothing here.
    pub long_lines: u64,
}

pub struct RecordParser {
    opts: ReaderOptions,
    // Scratch for the header, then the sequence, of the current call only.
    scratch: Vec<u8>,
    stats: ReaderStats,
}

impl RecordParser {
    pub fn new(opts: ReaderOptions) -> Result<Self, FastaError> {
        opts.validate()?;
        Ok(Self {
            // grows on demand up to the configured bound
            scratch: Vec::with_capacity(opts.scratch_len().min(SCRATCH_LEN)),
            opts,
            stats: ReaderStats::default(),
        })
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.opts
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Parse the next record.
    ///
    /// `Ok(None)` is the clean end of input. Any `Err` leaves the stream in an
    /// unspecified position; callers should stop reading it.
    pub fn parse_next<S>(&mut self, stream: &mut S) -> Result<Option<FastaRecord>, FastaError>
    where
        S: ByteStream + ?Sized,
    {
        let first = match stream.read_byte() {
            Ok(Some(b)) => b,
            Ok(None) => return Ok(None),
            Err(e) => {
                log::warn!("read error at record boundary, treating as end of input: {e}");
                return Ok(None);
            }
        };

        let description = self.read_header(stream, first)?;
        let id = extract_id(&description);
        let (sequence, tally) = self.read_sequence(stream)?;

        self.stats.records += 1;
        self.stats.lines += 1 + tally.lines;
        self.stats.long_lines += tally.long_lines;
        log::trace!(
            "record id={id}: {} description bytes, {} sequence bytes",
            description.len(),
            sequence.len()
        );
        Ok(Some(FastaRecord::populated(id, description, sequence)))
    }

    fn read_header<S>(&mut self, stream: &mut S, first: u8) -> Result<Vec<u8>, FastaError>
    where
        S: ByteStream + ?Sized,
    {
        if self.opts.marker_check == MarkerCheck::Require && first != RECORD_MARKER {
            return Err(format_err(stream, FormatError::BadMarker { found: first }));
        }

        let limit = self.opts.max_description_len;
        self.scratch.clear();
        self.scratch.push(first);
        if first != b'\n' {
            let n = stream
                .read_line_bounded(&mut self.scratch, limit - 1)
                .map_err(|e| FastaError::io_err(e, stream.context()))?;
            if n == 0 {
                return Err(eof(stream, EofPoint::MidHeader));
            }
        }

        if self.scratch.last() != Some(&b'\n') {
            let err = if self.scratch.len() >= limit {
                FormatError::HeaderTooLong { limit }
            } else {
                FormatError::UnexpectedEof(EofPoint::MidHeader)
            };
            return Err(format_err(stream, err));
        }
        Ok(self.scratch.clone())
    }

    fn read_sequence<S>(&mut self, stream: &mut S) -> Result<(Vec<u8>, LineTally), FastaError>
    where
        S: ByteStream + ?Sized,
    {
        let capacity = self.opts.sequence_capacity;
        let overflow = FormatError::SequenceOverflow { capacity };

        self.scratch.clear();
        let mut peeked = stream
            .read_byte()
            .map_err(|e| FastaError::io_err(e, stream.context()))?
            .ok_or_else(|| eof(&*stream, EofPoint::BeforeSequence))?;
        if peeked == RECORD_MARKER {
            // header directly followed by the next header
            stream.unread(RECORD_MARKER);
            return Ok((Vec::new(), LineTally::default()));
        }

        let mut tally = LineTally::default();
        loop {
            let line_start = self.scratch.len();
            if line_start >= capacity {
                return Err(format_err(stream, overflow));
            }
            self.scratch.push(peeked);
            if peeked != b'\n' {
                let room = capacity - self.scratch.len();
                if room == 0 {
                    return Err(format_err(stream, overflow));
                }
                let n = stream
                    .read_line_bounded(&mut self.scratch, room)
                    .map_err(|e| FastaError::io_err(e, stream.context()))?;
                if n == 0 {
                    return Err(eof(stream, EofPoint::MidSequence));
                }
            }
            tally.lines += 1;

            let terminated = self.scratch.last() == Some(&b'\n');
            let residues = self.scratch.len() - line_start - usize::from(terminated);
            if residues >= self.opts.recommended_line_len {
                tally.long_lines += 1;
                log::warn!(
                    "sequence line of length {residues} at line {} is longer than the {} character recommendation",
                    stream.context().line_num,
                    self.opts.recommended_line_len
                );
            }

            if !terminated {
                if self.scratch.len() >= capacity {
                    return Err(format_err(stream, overflow));
                }
                // unterminated last line of the input
                break;
            }

            match stream
                .read_byte()
                .map_err(|e| FastaError::io_err(e, stream.context()))?
            {
                Some(RECORD_MARKER) => {
                    stream.unread(RECORD_MARKER);
                    break;
                }
                Some(b) => peeked = b,
                None => {
                    self.scratch.pop();
                    break;
                }
            }
        }

        Ok((self.scratch.clone(), tally))
    }
}

/// Per-record line counts, folded into [`ReaderStats`] once the record is complete.
#[derive(Debug, Default)]
struct LineTally {
    lines: u64,
    long_lines: u64,
}

#[inline]
fn format_err<S: ByteStream + ?Sized>(stream: &S, err: FormatError) -> FastaError {
    FastaError::fmt_err(err, stream.context())
}

#[inline]
fn eof<S: ByteStream + ?Sized>(stream: &S, at: EofPoint) -> FastaError {
    format_err(stream, FormatError::UnexpectedEof(at))
}

/// Integer right after the first `|` of a header, or [`NO_ID`].
pub fn extract_id(header: &[u8]) -> i64 {
    let Some(bar) = header.iter().position(|&b| b == ID_SEPARATOR) else {
        return NO_ID;
    };
    let rest = &header[bar + 1..];
    let sign = usize::from(matches!(rest.first(), Some(b'-' | b'+')));
    let digits = rest[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return NO_ID;
    }
    std::str::from_utf8(&rest[..sign + digits])
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(NO_ID)
}

use crate::error::OptionsError;

/// Sequence lines the scratch buffer is sized for.
pub const MAX_SEQUENCE_LINES: usize = 1024;
/// Residue count at or above which a sequence line draws a warning.
pub const RECOMMENDED_LINE_LENGTH: usize = 80;
/// Longest header line, marker and terminator included.
pub const MAX_DESCRIPTION_LINE_LENGTH: usize = 1024;

pub(crate) const SCRATCH_LEN: usize = MAX_SEQUENCE_LINES * RECOMMENDED_LINE_LENGTH;

const _: () = assert!(SCRATCH_LEN > MAX_DESCRIPTION_LINE_LENGTH);

/// What to do with the first byte of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerCheck {
    /// Take whatever byte starts the record as its marker.
    Trust,
    /// Reject a record whose first byte is not `>`.
    Require,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Upper bound on the header line, `>` and `\n` included.
    pub max_description_len: usize,
    /// Bytes available to one record's sequence.
    pub sequence_capacity: usize,
    /// Lines with at least this many bytes before the terminator are reported.
    pub recommended_line_len: usize,
    pub marker_check: MarkerCheck,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_description_len: MAX_DESCRIPTION_LINE_LENGTH,
            // last two scratch bytes stay reserved
            sequence_capacity: SCRATCH_LEN - 2,
            recommended_line_len: RECOMMENDED_LINE_LENGTH,
            marker_check: MarkerCheck::Trust,
        }
    }
}

impl ReaderOptions {
    /// Size of the scratch buffer shared by the header and sequence phases.
    pub fn scratch_len(&self) -> usize {
        self.sequence_capacity.saturating_add(2)
    }

    /// Checked once when a parser is built, never per record.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.sequence_capacity.checked_add(2).is_none() {
            return Err(OptionsError::CapacityOverflow(self.sequence_capacity));
        }
        if self.max_description_len < 2 {
            return Err(OptionsError::DescriptionTooShort(self.max_description_len));
        }
        if self.scratch_len() <= self.max_description_len {
            return Err(OptionsError::BufferTooSmall {
                buffer: self.scratch_len(),
                description: self.max_description_len,
            });
        }
        if self.recommended_line_len == 0 {
            return Err(OptionsError::ZeroLineLength);
        }
        Ok(())
    }
}

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

/// Identifier value for a header with no usable `|<digits>` part.
pub const NO_ID: i64 = -1;

/// One FASTA entry.
///
/// A record handed out by the parser always has both `description` and
/// `sequence`; an empty record (both `None`) only exists between
/// [`FastaRecord::new`] and a successful parse, or after [`FastaRecord::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: i64,
    /// Header line as read, leading `>` and trailing `\n` included.
    pub description: Option<Vec<u8>>,
    /// Sequence lines with their terminators. The last terminator is dropped
    /// when the record runs to end of input.
    pub sequence: Option<Vec<u8>>,
}

impl Default for FastaRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl FastaRecord {
    pub fn new() -> Self {
        Self {
            id: NO_ID,
            description: None,
            sequence: None,
        }
    }

    /// Heap-allocated empty record, paired with [`FastaRecord::release`].
    pub fn allocate() -> Box<Self> {
        Box::new(Self::new())
    }

    pub(crate) fn populated(id: i64, description: Vec<u8>, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: Some(description),
            sequence: Some(sequence),
        }
    }

    /// Drop owned fields and reset the id. Calling it again is a no-op.
    pub fn clear(&mut self) {
        self.description = None;
        self.sequence = None;
        self.id = NO_ID;
    }

    /// Clear the record, then free the box holding it.
    pub fn release(mut self: Box<Self>) {
        self.clear();
    }

    #[inline]
    pub fn id_opt(&self) -> Option<i64> {
        (self.id != NO_ID).then_some(self.id)
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.description.is_some() && self.sequence.is_some()
    }

    pub fn description_str(&self) -> Option<Cow<'_, str>> {
        self.description.as_deref().map(String::from_utf8_lossy)
    }

    pub fn sequence_str(&self) -> Option<Cow<'_, str>> {
        self.sequence.as_deref().map(String::from_utf8_lossy)
    }

    /// Sequence length in bytes, terminators included.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.as_ref().map_or(0, Vec::len)
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the human-readable dump produced by `Display`.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FASTA Record:")?;
        writeln!(f, "ID   ({})", self.id)?;
        writeln!(f, "DESC [{}]", self.description_str().unwrap_or_default())?;
        writeln!(f, "SEQ  [{}]", self.sequence_str().unwrap_or_default())
    }
}

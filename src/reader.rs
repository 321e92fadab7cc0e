use crate::error::{FastaError, IoContext};
use crate::parser::{ReaderStats, RecordParser};
use crate::policy::ReaderOptions;
use crate::record::FastaRecord;
use crate::stream::PushbackStream;
use crate::util::is_gzip;

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const BUF_CAPACITY: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// Streaming FASTA reader (plain/.gz), one record per call.
pub struct FastaReader {
    src: Source,
    stream: PushbackStream<Box<dyn BufRead + Send>>,
    parser: RecordParser,
    // Set on end of input or the first error; nothing is read afterwards.
    finished: bool,
}

impl FastaReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, FastaError> {
        let path = path.as_ref();
        let parser = RecordParser::new(opts)?;
        let start = IoContext {
            byte_pos: 0,
            line_num: 0,
        };
        let mut f = File::open(path).map_err(|e| FastaError::io_err(e, start))?;

        let rdr: Box<dyn BufRead + Send> = if is_gzip(path, &mut f) {
            #[cfg(feature = "gzip")]
            {
                Box::new(BufReader::with_capacity(BUF_CAPACITY, MultiGzDecoder::new(f)))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastaError::io_err(
                    std::io::Error::new(
                        std::io::ErrorKind::Unsupported,
                        "gzip input requires the `gzip` feature",
                    ),
                    start,
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                use std::io::Cursor;
                // SAFETY: the map is read-only and the file is not modified by this crate.
                let mmap = unsafe { Mmap::map(&f) }.map_err(|e| FastaError::io_err(e, start))?;
                Box::new(BufReader::with_capacity(BUF_CAPACITY, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(BUF_CAPACITY, f))
            }
        };

        log::debug!("opened FASTA input {}", path.display());
        Ok(Self {
            src: Source::Path(path.to_path_buf()),
            stream: PushbackStream::new(rdr),
            parser,
            finished: false,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(
        reader: R,
        opts: ReaderOptions,
    ) -> Result<Self, FastaError> {
        Ok(Self {
            src: Source::Reader,
            stream: PushbackStream::new(Box::new(reader)),
            parser: RecordParser::new(opts)?,
            finished: false,
        })
    }

    /// Next record; `Ok(None)` at end of input.
    ///
    /// An error is fatal for this input: later calls return `Ok(None)`.
    pub fn next_record(&mut self) -> Result<Option<FastaRecord>, FastaError> {
        if self.finished {
            return Ok(None);
        }
        match self.parser.parse_next(&mut self.stream) {
            Ok(Some(rec)) => Ok(Some(rec)),
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                log::debug!("stopping {:?} after error: {err}", self.src);
                Err(err)
            }
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    pub fn stats(&self) -> ReaderStats {
        self.parser.stats()
    }
}

impl Iterator for FastaReader {
    type Item = Result<FastaRecord, FastaError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl std::iter::FusedIterator for FastaReader {}

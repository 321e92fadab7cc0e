use crate::error::IoContext;

use std::io::{self, BufRead};

/// Byte source with one byte of pushback, as consumed by
/// [`RecordParser`](crate::parser::RecordParser).
pub trait ByteStream {
    /// Next byte, or `None` once the stream is exhausted.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Append at most `max` bytes to `buf`, stopping after the first `\n`.
    /// Returns the number of bytes appended; `0` means nothing was left.
    fn read_line_bounded(&mut self, buf: &mut Vec<u8>, max: usize) -> io::Result<usize>;

    /// Return `byte` to the front of the stream. Only one byte may be
    /// pending at a time.
    fn unread(&mut self, byte: u8);

    fn context(&self) -> IoContext;
}

/// [`ByteStream`] over any `BufRead`.
pub struct PushbackStream<R> {
    inner: R,
    pending: Option<u8>,
    byte_pos: u64,
    line_num: u64,
}

impl<R: BufRead> PushbackStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
            byte_pos: 0,
            line_num: 0,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Hand back the wrapped reader. A pushed-back byte is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn advance(&mut self, consumed: &[u8]) {
        self.byte_pos += consumed.len() as u64;
        self.line_num += consumed.iter().filter(|&&b| b == b'\n').count() as u64;
    }

    /// Run `f` over the next non-interrupted `fill_buf`, one inner call per success.
    fn with_filled<T>(&mut self, f: impl FnOnce(&[u8]) -> T) -> io::Result<T> {
        loop {
            match self.inner.fill_buf() {
                Ok(avail) => return Ok(f(avail)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> ByteStream for PushbackStream<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pending.take() {
            self.advance(&[b]);
            return Ok(Some(b));
        }
        let Some(b) = self.with_filled(|avail| avail.first().copied())? else {
            return Ok(None);
        };
        self.inner.consume(1);
        self.advance(&[b]);
        Ok(Some(b))
    }

    fn read_line_bounded(&mut self, buf: &mut Vec<u8>, max: usize) -> io::Result<usize> {
        let mut n = 0;
        if max == 0 {
            return Ok(0);
        }
        if let Some(b) = self.pending.take() {
            buf.push(b);
            self.advance(&[b]);
            n += 1;
            if b == b'\n' {
                return Ok(n);
            }
        }
        while n < max {
            let start = buf.len();
            let remaining = max - n;
            let (len, done) = self.with_filled(|avail| {
                let window = &avail[..avail.len().min(remaining)];
                let (len, done) = match window.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (window.len(), false),
                };
                buf.extend_from_slice(&window[..len]);
                (len, done)
            })?;
            if len == 0 {
                break;
            }
            self.inner.consume(len);
            self.advance(&buf[start..]);
            n += len;
            if done {
                break;
            }
        }
        Ok(n)
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.pending.is_none(), "only one byte of pushback");
        self.pending = Some(byte);
        self.byte_pos = self.byte_pos.saturating_sub(1);
        if byte == b'\n' {
            self.line_num = self.line_num.saturating_sub(1);
        }
    }

    #[inline]
    fn context(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

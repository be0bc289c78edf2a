//! Chunked input acquisition
//!
//! Pulls input into a buffer that is allocated once and never grows. A unit
//! that does not fit is reported as an overflow instead of being split.

use std::io::{self, BufRead, ErrorKind, Write};

/// How much input makes up one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One newline-terminated line per read
    Line,
    /// As many bytes as fit per read
    Block,
}

/// Result of a single [`ChunkReader::read`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOutcome {
    /// Bytes added to the buffer by this read (carried bytes excluded)
    pub bytes_read: usize,
    /// The stream ended and this read produced nothing
    pub end_of_input: bool,
    /// The unit could not be completed within the buffer capacity
    pub overflow: bool,
}

/// Reads lines or blocks from `R` into a fixed-capacity buffer
pub struct ChunkReader<R> {
    inner: R,
    buf: Box<[u8]>,
    /// Bytes of `buf` holding data
    filled: usize,
    /// Tail bytes of the current chunk kept for the next read
    carried: usize,
    mode: ReadMode,
    /// End of stream (or a read error) has been seen
    exhausted: bool,
}

impl<R: BufRead> ChunkReader<R> {
    /// Create a reader with a buffer of `capacity` bytes (at least one)
    pub fn new(inner: R, capacity: usize, mode: ReadMode) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            filled: 0,
            carried: 0,
            mode,
            exhausted: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Data of the current unit, including any carried prefix
    pub fn chunk(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Keep `chunk()[offset..]` and prepend it to the next read
    pub fn carry_from(&mut self, offset: usize) {
        self.carried = self.filled - offset.min(self.filled);
    }

    /// Read the next unit
    pub fn read(&mut self) -> ReadOutcome {
        if self.carried > 0 {
            let start = self.filled - self.carried;
            self.buf.copy_within(start..self.filled, 0);
        }
        self.filled = self.carried;
        self.carried = 0;

        match self.mode {
            ReadMode::Line => self.read_line(),
            ReadMode::Block => self.read_block(),
        }
    }

    fn read_line(&mut self) -> ReadOutcome {
        let mut terminated = false;

        while !self.exhausted && self.filled < self.buf.len() {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Read error, treating as end of input: {}", e);
                    self.exhausted = true;
                    break;
                },
            };
            if available.is_empty() {
                self.exhausted = true;
                break;
            }

            let space = self.buf.len() - self.filled;
            let window = &available[..available.len().min(space)];
            let take = match window.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    terminated = true;
                    newline + 1
                },
                None => window.len(),
            };
            self.buf[self.filled..self.filled + take].copy_from_slice(&window[..take]);
            self.inner.consume(take);
            self.filled += take;

            if terminated {
                break;
            }
        }

        let full = self.filled == self.buf.len();
        ReadOutcome {
            bytes_read: self.filled,
            end_of_input: self.filled == 0,
            overflow: full && !terminated && !self.at_eof(),
        }
    }

    fn read_block(&mut self) -> ReadOutcome {
        let carried = self.filled;
        if carried == self.buf.len() {
            // A carried word fills the whole buffer
            let end = self.at_eof();
            return ReadOutcome {
                bytes_read: 0,
                end_of_input: end,
                overflow: !end,
            };
        }

        while !self.exhausted && self.filled < self.buf.len() {
            match self.inner.read(&mut self.buf[self.filled..]) {
                Ok(0) => self.exhausted = true,
                Ok(n) => self.filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => {
                    tracing::warn!("Read error, treating as end of input: {}", e);
                    self.exhausted = true;
                },
            }
        }

        let bytes_read = self.filled - carried;
        ReadOutcome {
            bytes_read,
            end_of_input: bytes_read == 0,
            overflow: false,
        }
    }

    /// Whether the stream has nothing more to give
    fn at_eof(&mut self) -> bool {
        if self.exhausted {
            return true;
        }
        loop {
            match self.inner.fill_buf() {
                Ok(available) => {
                    self.exhausted = available.is_empty();
                    return self.exhausted;
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => {
                    tracing::warn!("Read error, treating as end of input: {}", e);
                    self.exhausted = true;
                    return true;
                },
            }
        }
    }

    /// Copy everything left in the stream to `out` without buffering it here.
    ///
    /// Read errors end the copy; write errors are returned.
    pub fn copy_remaining<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<u64> {
        let mut copied = 0u64;
        while !self.exhausted {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Read error, treating as end of input: {}", e);
                    self.exhausted = true;
                    break;
                },
            };
            if available.is_empty() {
                self.exhausted = true;
                break;
            }
            out.write_all(available)?;
            let len = available.len();
            self.inner.consume(len);
            copied += len as u64;
        }
        Ok(copied)
    }
}

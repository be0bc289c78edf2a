//! Output accumulation with a fixed capacity

use std::io::{self, Write};

/// Accumulates output bytes and writes them to `W` in large pieces.
///
/// The buffer never grows: an append that would not fit flushes first.
pub struct OutputBuffer<W: Write> {
    out: W,
    buf: Box<[u8]>,
    used: usize,
}

impl<W: Write> OutputBuffer<W> {
    /// Create a buffer of `capacity` bytes (at least one)
    pub fn new(out: W, capacity: usize) -> Self {
        Self {
            out,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            used: 0,
        }
    }

    /// Bytes waiting to be written
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Append `data`, flushing first if it would not fit
    pub fn add(&mut self, data: &[u8]) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if self.used + data.len() > self.buf.len() {
            self.flush()?;
        }
        if data.len() > self.buf.len() {
            // Callers size the buffer so this never happens; write through rather than split
            return self.out.write_all(data);
        }
        self.buf[self.used..self.used + data.len()].copy_from_slice(data);
        self.used += data.len();
        Ok(())
    }

    /// Write out the buffered bytes and reset usage
    pub fn flush(&mut self) -> io::Result<()> {
        if self.used > 0 {
            self.out.write_all(&self.buf[..self.used])?;
            self.used = 0;
        }
        Ok(())
    }

    /// Flush the buffer and then the underlying stream
    pub fn flush_stream(&mut self) -> io::Result<()> {
        self.flush()?;
        self.out.flush()
    }

    /// Underlying writer; anything written here bypasses the buffer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Return the writer without flushing
    pub fn into_inner(self) -> W {
        self.out
    }
}

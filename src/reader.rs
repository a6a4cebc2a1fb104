use crate::{BYTE_BIT_COUNT, CRUMB_BIT_COUNT, CRUMB_BIT_MASK};
use log::debug;
use std::io::{ErrorKind, Read};

/// Outcome of pulling one crumb from a [`CrumbReader`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadCrumb {
    /// The next crumb, held in the two least significant bits.
    Crumb(u8),
    /// The source is exhausted on a crumb boundary.
    EndOfInput,
    /// The source ended part way through a crumb.
    Truncated,
}

/// Reads a byte stream two bits at a time, most significant bits first.
pub struct CrumbReader<R> {
    inner: R,
    buffer: Vec<u8>,
    // bytes filled by the last refill, less than buffer.len() on a short read
    filled: usize,
    bits_left: usize,
}

impl<R: Read> CrumbReader<R> {
    /// Wraps `inner`, refilling up to `buffer_size` bytes at a time. A size of 0 is treated as 1.
    pub fn new(inner: R, buffer_size: usize) -> Self {
        Self {
            inner,
            buffer: vec![0; buffer_size.max(1)],
            filled: 0,
            bits_left: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    // Reads until the buffer is full or the source reports end of stream.
    fn fill_buffer(&mut self) -> Result<(), std::io::Error> {
        let mut count = 0;
        while count < self.buffer.len() {
            match self.inner.read(&mut self.buffer[count..]) {
                Ok(0) => break,
                Ok(n) => count += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }

        if count < self.buffer.len() {
            debug!("short read: {} of {} bytes", count, self.buffer.len());
        }

        self.filled = count;
        self.bits_left = count * BYTE_BIT_COUNT;
        Ok(())
    }

    pub fn read_crumb(&mut self) -> Result<ReadCrumb, std::io::Error> {
        if self.bits_left < CRUMB_BIT_COUNT {
            let leftover = self.bits_left;
            self.fill_buffer()?;
            if self.bits_left == 0 {
                return Ok(if leftover == 0 {
                    ReadCrumb::EndOfInput
                } else {
                    ReadCrumb::Truncated
                });
            }
        }

        if self.bits_left < CRUMB_BIT_COUNT {
            return Ok(ReadCrumb::Truncated);
        }

        let consumed = self.filled * BYTE_BIT_COUNT - self.bits_left;
        let byte = self.buffer[consumed / BYTE_BIT_COUNT];
        // consumed % 8 = 0 -> shift 6, 2 -> 4, 4 -> 2, 6 -> 0
        let shift = BYTE_BIT_COUNT - CRUMB_BIT_COUNT - consumed % BYTE_BIT_COUNT;
        self.bits_left -= CRUMB_BIT_COUNT;

        Ok(ReadCrumb::Crumb((byte >> shift) & CRUMB_BIT_MASK))
    }
}

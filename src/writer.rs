use crate::{BYTE_BIT_COUNT, CRUMB_BIT_COUNT, CRUMB_BIT_MASK};
use log::debug;
use std::io::Write;

/// Accumulates crumbs into bytes, most significant bits first, and writes them out a buffer at a time.
pub struct CrumbWriter<W: Write> {
    inner: W,
    buffer: Vec<u8>,
    bits_index: usize,
}

impl<W: Write> CrumbWriter<W> {
    /// Wraps `inner` with a buffer of `buffer_size` bytes. A size of 0 is treated as 1.
    pub fn new(inner: W, buffer_size: usize) -> Self {
        Self {
            inner,
            buffer: vec![0; buffer_size.max(1)],
            bits_index: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    // A sink that accepts zero bytes surfaces as ErrorKind::WriteZero from write_all.
    fn sink_buffer(&mut self, count: usize) -> Result<(), std::io::Error> {
        self.bits_index = 0;
        self.inner.write_all(&self.buffer[..count])
    }

    /// Appends the low two bits of `crumb`, flushing the buffer once it is full.
    pub fn write_crumb(&mut self, crumb: u8) -> Result<(), std::io::Error> {
        let target = &mut self.buffer[self.bits_index / BYTE_BIT_COUNT];
        *target = (*target << CRUMB_BIT_COUNT) | (crumb & CRUMB_BIT_MASK);
        self.bits_index += CRUMB_BIT_COUNT;

        if self.bits_index == self.buffer.len() * BYTE_BIT_COUNT {
            let count = self.buffer.len();
            self.sink_buffer(count)?;
        }
        Ok(())
    }

    /// Writes every completed byte still in the buffer. An incomplete trailing byte is dropped.
    pub fn sink(&mut self) -> Result<(), std::io::Error> {
        let count = self.bits_index / BYTE_BIT_COUNT;
        let dropped = self.bits_index % BYTE_BIT_COUNT;
        if dropped != 0 {
            debug!("dropping {} trailing bits", dropped);
        }
        self.sink_buffer(count)?;
        self.inner.flush()
    }
}

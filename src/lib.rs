pub mod decoder;
pub mod encoder;
pub mod files;
pub mod reader;
pub mod writer;

pub use decoder::Decoder;
pub use encoder::{EncodeReport, Encoder};
pub use reader::{CrumbReader, ReadCrumb};
pub use writer::CrumbWriter;

pub const CRUMB_BIT_MASK: u8 = 0b11;
pub const NEGATED_CRUMB_BIT_MASK: u8 = 0b1111_1100;

pub const CRUMB_BIT_COUNT: usize = 2;
pub const BYTE_BIT_COUNT: usize = 8;
/// Red, green and blue. Alpha never carries data.
pub const CHANNEL_COUNT: usize = 3;

/// Bytes buffered by the crumb reader and writer unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 3;

/// Order in which pixels are visited. Encoding and decoding must agree on it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TraversalOrder {
    /// Left to right along each row, rows top to bottom.
    RowMajor,
    /// Top to bottom along each column, columns left to right.
    ColumnMajor,
}

impl Default for TraversalOrder {
    fn default() -> Self {
        TraversalOrder::RowMajor
    }
}

impl TraversalOrder {
    pub fn positions(self, width: u32, height: u32) -> Positions {
        Positions {
            order: self,
            width,
            height,
            index: 0,
            total: width as u64 * height as u64,
        }
    }
}

/// Iterator over `(x, y)` pixel coordinates in a [`TraversalOrder`].
#[derive(Debug, Clone)]
pub struct Positions {
    order: TraversalOrder,
    width: u32,
    height: u32,
    index: u64,
    total: u64,
}

impl Iterator for Positions {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let i = self.index;
        self.index += 1;

        let (width, height) = (self.width as u64, self.height as u64);
        let position = match self.order {
            TraversalOrder::RowMajor => (i % width, i / width),
            TraversalOrder::ColumnMajor => (i / height, i % height),
        };
        Some((position.0 as u32, position.1 as u32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.index) as usize;
        (remaining, Some(remaining))
    }
}

/// Number of crumbs a `width` x `height` image can hold.
pub fn capacity_crumbs(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * CHANNEL_COUNT as u64
}

/// Whole bytes a `width` x `height` image can hold.
pub fn capacity_bytes(width: u32, height: u32) -> u64 {
    capacity_crumbs(width, height) * CRUMB_BIT_COUNT as u64 / BYTE_BIT_COUNT as u64
}

fn err_to_io_error<E>(error: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::Other, error.into())
}

use crate::*;
use image::RgbaImage;
use log::{debug, info};
use std::io::{BufRead, Seek, Write};

pub struct Decoder {
    order: TraversalOrder,
    buffer_size: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(TraversalOrder::default())
    }
}

impl Decoder {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            order,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn decode<R: BufRead + Seek, W: Write>(
        &self,
        input_image: &mut R,
        output: &mut W,
    ) -> Result<(), std::io::Error> {
        match image::load(input_image, image::ImageFormat::Png) {
            Ok(img) => self.extract(&img.to_rgba8(), output),
            Err(err) => Err(err_to_io_error(err)),
        }
    }

    /// Writes the two low bits of every red, green and blue channel of `stego` to `output`.
    ///
    /// There is no length marker, so the whole capacity of the image is extracted. Anything past
    /// the end of the hidden secret is whatever the cover image happened to carry.
    pub fn extract<W: Write>(&self, stego: &RgbaImage, output: &mut W) -> Result<(), std::io::Error> {
        let (width, height) = stego.dimensions();
        let mut writer = CrumbWriter::new(output, self.buffer_size);

        info!("Decoding...");
        for (x, y) in self.order.positions(width, height) {
            let pixel = stego.get_pixel(x, y);
            for channel in pixel.0.iter().take(CHANNEL_COUNT) {
                writer.write_crumb(channel & CRUMB_BIT_MASK)?;
            }
        }
        writer.sink()?;

        debug!("extracted {} bytes", capacity_bytes(width, height));
        info!("Done!");
        Ok(())
    }
}

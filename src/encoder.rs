use crate::*;
use image::RgbaImage;
use log::{debug, info, warn};
use std::io::{BufRead, Read, Seek, Write};

/// Summary of a single embedding pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncodeReport {
    pub crumbs_embedded: u64,
    pub capacity_crumbs: u64,
    /// The secret had more data than the image could hold and was cut short.
    pub overflowed: bool,
}

pub struct Encoder {
    order: TraversalOrder,
    buffer_size: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(TraversalOrder::default())
    }
}

impl Encoder {
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

    /// Hides `secret` in the PNG `cover_image` and writes the resulting PNG to `output`.
    pub fn encode<R1: BufRead + Seek, R2: Read, W: Write>(
        &self,
        cover_image: R1,
        secret: &mut R2,
        output: &mut W,
    ) -> Result<EncodeReport, std::io::Error> {
        match image::load(cover_image, image::ImageFormat::Png) {
            Ok(img) => {
                let (stego, report) = self.embed(&img.to_rgba8(), secret)?;

                match image::DynamicImage::ImageRgba8(stego)
                    .write_to(output, image::ImageFormat::Png)
                {
                    Ok(_) => Ok(report),
                    Err(err) => Err(err_to_io_error(err)),
                }
            }
            Err(err) => Err(err_to_io_error(err)),
        }
    }

    /// Returns a copy of `cover` whose red, green and blue channels carry `secret` in their two
    /// low bits, one crumb per channel. Channels visited after the secret runs out are left as is.
    pub fn embed<R: Read>(
        &self,
        cover: &RgbaImage,
        secret: &mut R,
    ) -> Result<(RgbaImage, EncodeReport), std::io::Error> {
        let (width, height) = cover.dimensions();
        let mut reader = CrumbReader::new(secret, self.buffer_size);
        let mut stego = cover.clone();

        let capacity_crumbs = capacity_crumbs(width, height);
        info!("max encodable size:\t{} bytes", capacity_bytes(width, height));
        info!("Encoding...");

        let mut crumbs_embedded = 0;
        let mut exhausted = false;
        'pixels: for (x, y) in self.order.positions(width, height) {
            let pixel = stego.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut().take(CHANNEL_COUNT) {
                match reader.read_crumb()? {
                    ReadCrumb::Crumb(crumb) => {
                        *channel = (*channel & NEGATED_CRUMB_BIT_MASK) | (crumb & CRUMB_BIT_MASK);
                        crumbs_embedded += 1;
                    }
                    ReadCrumb::EndOfInput => {
                        debug!("secret exhausted after {} crumbs", crumbs_embedded);
                        exhausted = true;
                        break 'pixels;
                    }
                    ReadCrumb::Truncated => {
                        warn!("secret ended mid crumb after {} crumbs", crumbs_embedded);
                        exhausted = true;
                        break 'pixels;
                    }
                }
            }
        }

        // A full image says nothing about the secret until one more crumb is asked for.
        let overflowed = !exhausted && matches!(reader.read_crumb()?, ReadCrumb::Crumb(_));

        info!("Done!");
        if overflowed {
            warn!(
                "Secret file was too big to encode in image, only the first {} bytes were kept",
                capacity_bytes(width, height)
            );
        }

        Ok((
            stego,
            EncodeReport {
                crumbs_embedded,
                capacity_crumbs,
                overflowed,
            },
        ))
    }
}

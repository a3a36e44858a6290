use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, RgbaImage};

use crate::error::{ConvertError, Result};
use crate::format::ImageFormat;

/// Quality passed to lossy encoders, in `0.0..=1.0`.
pub const IMAGE_QUALITY: f32 = 0.9;

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    fn encode(&self, pixels: &PixelBuffer, format: ImageFormat, quality: f32) -> Result<Vec<u8>>;
}

/// Raster codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

impl ImageCodec for RasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ConvertError::Encode(format!("Failed to load image: {e}")))?
            .to_rgba8();
        Ok(PixelBuffer {
            width: img.width(),
            height: img.height(),
            rgba: img.into_raw(),
        })
    }

    fn encode(&self, pixels: &PixelBuffer, format: ImageFormat, quality: f32) -> Result<Vec<u8>> {
        let img: RgbaImage =
            ImageBuffer::from_raw(pixels.width, pixels.height, pixels.rgba.clone())
                .ok_or_else(|| ConvertError::Encode("Failed to create image buffer".to_string()))?;

        let encoded = match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
                let mut out = Vec::new();
                let jpeg_quality = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
                let encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality.max(1));
                rgb.write_with_encoder(encoder)
                    .map_err(|e| ConvertError::Encode(format!("Failed to encode JPEG: {e}")))?;
                out
            }
            other => {
                let mut cursor = Cursor::new(Vec::new());
                img.write_to(&mut cursor, image_format(other))
                    .map_err(|e| ConvertError::Encode(format!("Failed to encode {:?}: {e}", other)))?;
                cursor.into_inner()
            }
        };

        Ok(encoded)
    }
}

fn image_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::WebP => image::ImageFormat::WebP,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
        ImageFormat::Gif => image::ImageFormat::Gif,
    }
}

//! Decoding and re-encoding of uploaded images.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image too large: {size} bytes exceeds maximum of {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

pub struct ImageCodec;

impl ImageCodec {
    /// Validate that an object is small enough to decode
    pub fn validate_size(data: &[u8], max_size: usize) -> Result<(), ImageError> {
        if data.len() > max_size {
            return Err(ImageError::TooLarge {
                size: data.len(),
                max: max_size,
            });
        }

        tracing::debug!(size = data.len(), max_size = max_size, "Image size validation passed");
        Ok(())
    }

    /// Decode raw bytes, guessing the format from the content
    pub fn decode(data: &[u8]) -> Result<DynamicImage, ImageError> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ImageError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let (width, height) = img.dimensions();
        tracing::debug!(width, height, color = ?img.color(), "Decoded image");
        Ok(img)
    }

    /// Encode as JPEG at the given quality (1-100).
    ///
    /// JPEG has no alpha channel and no 16-bit samples, so anything other
    /// than 8-bit grayscale is flattened to 8-bit RGB first.
    pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImageError> {
        let flattened;
        let encodable = match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            _ => {
                flattened = DynamicImage::ImageRgb8(img.to_rgb8());
                &flattened
            }
        };

        let (width, height) = encodable.dimensions();
        let mut buffer = Vec::with_capacity((width * height) as usize / 4);
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        encodable
            .write_with_encoder(encoder)
            .map_err(|e| ImageError::Encode(e.to_string()))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_validate_size() {
        let data = vec![0u8; 1000];
        assert!(ImageCodec::validate_size(&data, 2000).is_ok());
        assert!(ImageCodec::validate_size(&data, 1000).is_ok());
        assert!(matches!(
            ImageCodec::validate_size(&data, 500),
            Err(ImageError::TooLarge { size: 1000, max: 500 })
        ));
    }

    #[test]
    fn test_decode_png() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([10, 20, 30])));
        let decoded = ImageCodec::decode(&png_bytes(&img)).unwrap();
        assert_eq!(decoded.dimensions(), (6, 4));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = ImageCodec::decode(b"definitely not an image");
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 100, 50])));
        let jpeg = ImageCodec::encode_jpeg(&img, 75).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "missing JPEG SOI marker");
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageCodec::decode(&jpeg).unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 3, Rgba([1, 2, 3, 100])));
        let jpeg = ImageCodec::encode_jpeg(&img, 90).unwrap();
        assert_eq!(ImageCodec::decode(&jpeg).unwrap().dimensions(), (5, 3));
    }
}

//! WebP thumbnail encoding.

use anyhow::Result;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, RgbaImage, imageops};

/// Encode a lossless WebP thumbnail, box-downsampled so the longest edge
/// is at most `max_edge`. Images already within bounds are encoded as-is.
pub(super) fn encode(image: &RgbaImage, max_edge: u32) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();

    let scaled;
    let source = if width.max(height) > max_edge {
        let scale = max_edge as f64 / width.max(height) as f64;
        let thumb_width = ((width as f64 * scale).round() as u32).max(1);
        let thumb_height = ((height as f64 * scale).round() as u32).max(1);
        scaled = imageops::thumbnail(image, thumb_width, thumb_height);
        &scaled
    } else {
        image
    };

    let mut bytes = Vec::new();
    WebPEncoder::new_lossless(&mut bytes).encode(
        source.as_raw(),
        source.width(),
        source.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn decoded(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        let image = RgbaImage::from_pixel(20, 10, Rgba([30, 90, 200, 255]));
        let bytes = encode(&image, 512).unwrap();

        // RIFF container with a WEBP tag
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let thumb = decoded(&bytes);
        assert_eq!(thumb.dimensions(), (20, 10));
    }

    #[test]
    fn test_large_image_is_downsampled() {
        let image = RgbaImage::from_pixel(1024, 512, Rgba([30, 90, 200, 255]));
        let bytes = encode(&image, 512).unwrap();

        let thumb = decoded(&bytes);
        assert_eq!(thumb.dimensions(), (512, 256));
    }

    #[test]
    fn test_narrow_image_never_collapses_to_zero() {
        let image = RgbaImage::from_pixel(2048, 1, Rgba([0, 0, 0, 255]));
        let bytes = encode(&image, 512).unwrap();

        let thumb = decoded(&bytes);
        assert_eq!(thumb.width(), 512);
        assert_eq!(thumb.height(), 1);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mut image = RgbaImage::new(64, 64);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255]);
        }

        assert_eq!(encode(&image, 32).unwrap(), encode(&image, 32).unwrap());
    }
}

use std::io::Cursor;

use image::ImageFormat;
use image::imageops::FilterType;

use crate::error::{StorageError, StorageResult};

/// Longest edge of generated thumbnails, in pixels
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 320;

/// Produce a JPEG thumbnail from arbitrary image bytes.
///
/// The image is scaled down preserving aspect ratio so its longest edge
/// is at most `max_dim`; images already within bounds are re-encoded
/// without resizing. Never upscales.
pub fn thumbnail(bytes: &[u8], max_dim: u32) -> StorageResult<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| StorageError::InvalidImage(e.to_string()))?;

    let resized = if decoded.width() > max_dim || decoded.height() > max_dim {
        decoded.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        decoded
    };

    let mut out = Cursor::new(Vec::new());
    resized
        .to_rgb8()
        .write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| StorageError::Backend(format!("Thumbnail encoding failed: {}", e)))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([120, 30, 200]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn shrinks_longest_edge_preserving_aspect() {
        let jpeg = thumbnail(&png_bytes(640, 480), 320).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (320, 240));
    }

    #[test]
    fn never_upscales_small_images() {
        let jpeg = thumbnail(&png_bytes(100, 50), 320).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (100, 50));
    }

    #[test]
    fn output_is_jpeg() {
        let jpeg = thumbnail(&png_bytes(10, 10), DEFAULT_THUMBNAIL_EDGE).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = thumbnail(b"definitely not an image", 320);
        assert!(matches!(result, Err(StorageError::InvalidImage(_))));
    }
}

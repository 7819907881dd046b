use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};

use crate::BigTextError;

/// Decode the image at `path` into a luminance sheet.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<GrayImage, BigTextError> {
    let path = path.as_ref();
    let image = image::open(path)?;
    log::debug!("decoded font image {}", path.display());
    Ok(flatten_luma(&image))
}

/// Decode an in-memory image into a luminance sheet.
pub fn load_bytes(bytes: &[u8]) -> Result<GrayImage, BigTextError> {
    let image = image::load_from_memory(bytes)?;
    Ok(flatten_luma(&image))
}

/// Luminance with transparent pixels composited over white.
fn flatten_luma(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma_alpha8();
    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in gray.enumerate_pixels() {
        let [luma, alpha] = pixel.0;
        let luma = u32::from(luma);
        let alpha = u32::from(alpha);
        let blended = (luma * alpha + 255 * (255 - alpha) + 127) / 255;
        output.put_pixel(x, y, Luma([blended as u8]));
    }

    output
}

#[cfg(test)]
mod tests {
    use image::{LumaA, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn opaque_pixels_keep_luminance() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let gray = flatten_luma(&DynamicImage::ImageRgba8(image));
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn transparent_pixels_become_background() {
        let image = image::ImageBuffer::from_pixel(1, 1, LumaA([0u8, 0]));
        let gray = flatten_luma(&DynamicImage::ImageLumaA8(image));
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn half_transparent_black_is_mid_gray() {
        let image = image::ImageBuffer::from_pixel(1, 1, LumaA([0u8, 128]));
        let gray = flatten_luma(&DynamicImage::ImageLumaA8(image));
        assert_eq!(gray.get_pixel(0, 0).0[0], 127);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = load_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, BigTextError::Image(_)));
    }
}

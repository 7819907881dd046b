//! Encoding of 2x4 pixel blocks as Unicode Braille patterns.

use crate::pixels::source::PixelSource;

use super::ExtractionOptions;

pub const BRAILLE_DOTS_WIDE: u32 = 2;
pub const BRAILLE_DOTS_HIGH: u32 = 4;

/// Empty Braille pattern, the encoding of an all-background block.
pub const BLANK: char = '\u{2800}';

/// Pixel offset `(dx, dy)` sampled for each bit of the pattern, in bit order.
///
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
pub const BIT_OFFSETS: [(u32, u32); 8] =
    [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (0, 3), (1, 3)];

/// Encode the block whose top-left pixel is `(x, y)`; dark samples become dots.
pub fn encode_block<S>(source: &S, x: u32, y: u32, options: &ExtractionOptions) -> char
where
    S: PixelSource + ?Sized,
{
    let mut bits = 0u32;
    for (bit, &(dx, dy)) in BIT_OFFSETS.iter().enumerate() {
        if options.is_on(source.intensity(x + dx, y + dy)) {
            bits |= 1 << bit;
        }
    }
    char::from_u32(BLANK as u32 | bits).unwrap_or(BLANK)
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    fn block(dark: &[(u32, u32)]) -> GrayImage {
        let mut image = GrayImage::from_pixel(2, 4, Luma([255]));
        for &(x, y) in dark {
            image.put_pixel(x, y, Luma([0]));
        }
        image
    }

    #[test]
    fn background_block_is_blank() {
        let options = ExtractionOptions::default();
        assert_eq!(encode_block(&block(&[]), 0, 0, &options), BLANK);
    }

    #[test]
    fn foreground_block_is_full() {
        let options = ExtractionOptions::default();
        let image = GrayImage::from_pixel(2, 4, Luma([0]));
        assert_eq!(encode_block(&image, 0, 0, &options), '\u{28FF}');
    }

    #[test]
    fn dots_follow_braille_numbering() {
        let options = ExtractionOptions::default();
        assert_eq!(encode_block(&block(&[(0, 0)]), 0, 0, &options), '\u{2801}');
        assert_eq!(encode_block(&block(&[(1, 0)]), 0, 0, &options), '\u{2808}');
        assert_eq!(encode_block(&block(&[(0, 3)]), 0, 0, &options), '\u{2840}');
        assert_eq!(encode_block(&block(&[(1, 3)]), 0, 0, &options), '\u{2880}');
        assert_eq!(encode_block(&block(&[(0, 0), (0, 1), (1, 2)]), 0, 0, &options), '\u{2823}');
    }

    #[test]
    fn mid_gray_is_not_a_dot() {
        let options = ExtractionOptions::default();
        let image = GrayImage::from_pixel(2, 4, Luma([PIXEL_GRAY]));
        assert_eq!(encode_block(&image, 0, 0, &options), BLANK);
    }

    #[test]
    fn samples_relative_to_origin() {
        let options = ExtractionOptions::default();
        let mut image = GrayImage::from_pixel(4, 8, Luma([255]));
        image.put_pixel(2, 4, Luma([0]));
        assert_eq!(encode_block(&image, 0, 0, &options), BLANK);
        assert_eq!(encode_block(&image, 2, 4, &options), '\u{2801}');
    }

    const PIXEL_GRAY: u8 = 128;
}

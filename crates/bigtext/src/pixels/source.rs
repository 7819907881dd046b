use image::GrayImage;

/// Random-access grayscale samples, 0 (black) to 255 (white).
///
/// Callers guarantee `x < width` and `y < height`.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);
    fn intensity(&self, x: u32, y: u32) -> u8;
}

impl PixelSource for GrayImage {
    fn dimensions(&self) -> (u32, u32) {
        GrayImage::dimensions(self)
    }

    fn intensity(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[0]
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn intensity(&self, x: u32, y: u32) -> u8 {
        (**self).intensity(x, y)
    }
}

impl<T: PixelSource + ?Sized> PixelSource for Box<T> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn intensity(&self, x: u32, y: u32) -> u8 {
        (**self).intensity(x, y)
    }
}

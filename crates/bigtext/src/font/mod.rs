pub mod braille;
pub mod glyph;
pub mod table;

use crate::BigTextError;

/// Samples darker than this are foreground dots.
pub const PIXEL_ON_THRESHOLD: u8 = 32;
/// Samples above [`PIXEL_ON_THRESHOLD`] and up to this value are width markers.
pub const WIDTH_MARKER_THRESHOLD: u8 = 224;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Intensity below which a sample sets its Braille dot.
    pub pixel_on_threshold: u8,
    /// Upper bound (inclusive) of the width marker band.
    pub width_marker_threshold: u8,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            pixel_on_threshold: PIXEL_ON_THRESHOLD,
            width_marker_threshold: WIDTH_MARKER_THRESHOLD,
        }
    }
}

impl ExtractionOptions {
    pub fn validate(&self) -> Result<(), BigTextError> {
        if self.pixel_on_threshold >= self.width_marker_threshold {
            return Err(BigTextError::InvalidThresholds {
                pixel_on: self.pixel_on_threshold,
                width_marker: self.width_marker_threshold,
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn is_on(&self, intensity: u8) -> bool {
        intensity < self.pixel_on_threshold
    }

    #[inline]
    pub(crate) fn is_width_marker(&self, intensity: u8) -> bool {
        intensity > self.pixel_on_threshold && intensity <= self.width_marker_threshold
    }
}

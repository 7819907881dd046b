mod font;
mod pixels;
mod render;

use std::fmt;
use std::path::Path;

pub use font::{
    braille::{encode_block, BIT_OFFSETS, BLANK, BRAILLE_DOTS_HIGH, BRAILLE_DOTS_WIDE},
    glyph::Glyph,
    table::{GlyphTable, FONT_CHARS_PER_ROW, FONT_NUM_ROWS, GLYPH_COUNT, GLYPH_OFFSET},
    ExtractionOptions, PIXEL_ON_THRESHOLD, WIDTH_MARKER_THRESHOLD,
};
pub use pixels::{
    loader::{load_bytes, load_path},
    source::PixelSource,
};
pub use render::{FontSource, TextRenderer, NO_FONT_MESSAGE};

#[derive(Debug, thiserror::Error)]
pub enum BigTextError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("image {dimension} ({value}) is not a multiple of {multiple}")]
    InvalidFontDimensions { dimension: Dimension, value: u32, multiple: u32 },
    #[error("width {width} specified for glyph at ({x},{y}) is not a multiple of {multiple}")]
    InvalidGlyphWidth { x: u32, y: u32, width: u32, multiple: u32 },
    #[error("pixel threshold ({pixel_on}) must be below the width marker threshold ({width_marker})")]
    InvalidThresholds { pixel_on: u8, width_marker: u8 },
}

/// Image axis named by [`BigTextError::InvalidFontDimensions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

impl GlyphTable {
    /// Decode the sprite sheet at `path` and extract its glyphs.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &ExtractionOptions,
    ) -> Result<Self, BigTextError> {
        let image = load_path(path)?;
        Self::build_with(&image, options)
    }

    /// Decode an in-memory sprite sheet and extract its glyphs.
    pub fn from_bytes(bytes: &[u8], options: &ExtractionOptions) -> Result<Self, BigTextError> {
        let image = load_bytes(bytes)?;
        Self::build_with(&image, options)
    }
}

use crate::pixels::source::PixelSource;
use crate::{BigTextError, Dimension};

use super::braille::{encode_block, BRAILLE_DOTS_HIGH, BRAILLE_DOTS_WIDE};
use super::glyph::Glyph;
use super::ExtractionOptions;

/// Glyph cells per sprite sheet row.
pub const FONT_CHARS_PER_ROW: u32 = 16;
/// Glyph cell rows per sprite sheet.
pub const FONT_NUM_ROWS: u32 = 6;
pub const GLYPH_COUNT: usize = (FONT_CHARS_PER_ROW * FONT_NUM_ROWS) as usize;
/// Character code of the first glyph (space).
pub const GLYPH_OFFSET: u32 = 0x20;

/// Pixel rectangle of one glyph cell.
#[derive(Clone, Copy, Debug)]
struct CellRect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Decoded font: one [`Glyph`] per printable ASCII code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<Glyph>,
    rows_per_glyph: usize,
}

impl GlyphTable {
    /// Extract glyphs with the default thresholds.
    pub fn build<S: PixelSource + ?Sized>(source: &S) -> Result<Self, BigTextError> {
        Self::build_with(source, &ExtractionOptions::default())
    }

    pub fn build_with<S: PixelSource + ?Sized>(
        source: &S,
        options: &ExtractionOptions,
    ) -> Result<Self, BigTextError> {
        options.validate()?;

        let (width, height) = source.dimensions();
        check_multiple(Dimension::Width, width, FONT_CHARS_PER_ROW * BRAILLE_DOTS_WIDE)?;
        check_multiple(Dimension::Height, height, FONT_NUM_ROWS * BRAILLE_DOTS_HIGH)?;

        let rows_per_glyph = (height / (FONT_NUM_ROWS * BRAILLE_DOTS_HIGH)) as usize;
        let cell_width = width / FONT_CHARS_PER_ROW;
        let cell_height = height / FONT_NUM_ROWS;
        log::debug!(
            "extracting {GLYPH_COUNT} glyphs from {width}x{height} sheet \
             ({cell_width}x{cell_height} cells, {rows_per_glyph} rows per glyph)"
        );

        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        for row in 0..FONT_NUM_ROWS {
            for column in 0..FONT_CHARS_PER_ROW {
                let cell = CellRect {
                    x: column * cell_width,
                    y: row * cell_height,
                    width: cell_width,
                    height: cell_height,
                };
                glyphs.push(extract_glyph(source, cell, options)?);
            }
        }

        Ok(Self { glyphs, rows_per_glyph })
    }

    pub fn rows_per_glyph(&self) -> usize {
        self.rows_per_glyph
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Glyph for `code`, or `None` outside the table's range.
    pub fn glyph_for_code(&self, code: u32) -> Option<&Glyph> {
        let index = code.checked_sub(GLYPH_OFFSET)?;
        self.glyphs.get(usize::try_from(index).ok()?)
    }

    pub fn glyph_for_char(&self, ch: char) -> Option<&Glyph> {
        self.glyph_for_code(ch as u32)
    }

    /// Glyphs paired with the character each one draws.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> + '_ {
        self.glyphs.iter().zip(GLYPH_OFFSET..).filter_map(|(glyph, code)| {
            char::from_u32(code).map(|ch| (ch, glyph))
        })
    }
}

fn check_multiple(dimension: Dimension, value: u32, multiple: u32) -> Result<(), BigTextError> {
    if value == 0 || value % multiple != 0 {
        return Err(BigTextError::InvalidFontDimensions { dimension, value, multiple });
    }
    Ok(())
}

fn extract_glyph<S: PixelSource + ?Sized>(
    source: &S,
    cell: CellRect,
    options: &ExtractionOptions,
) -> Result<Glyph, BigTextError> {
    let width = glyph_width(source, cell, options);
    if width % BRAILLE_DOTS_WIDE != 0 {
        return Err(BigTextError::InvalidGlyphWidth {
            x: cell.x,
            y: cell.y,
            width,
            multiple: BRAILLE_DOTS_WIDE,
        });
    }
    if width < cell.width {
        log::trace!("glyph at ({},{}) narrowed to {width}px", cell.x, cell.y);
    }

    let rows = (0..cell.height)
        .step_by(BRAILLE_DOTS_HIGH as usize)
        .map(|dy| {
            (0..width)
                .step_by(BRAILLE_DOTS_WIDE as usize)
                .map(|dx| encode_block(source, cell.x + dx, cell.y + dy, options))
                .collect::<String>()
        })
        .collect();

    Ok(Glyph::new(rows))
}

/// Leftmost width marker column anywhere in the cell, or the full cell width.
fn glyph_width<S: PixelSource + ?Sized>(
    source: &S,
    cell: CellRect,
    options: &ExtractionOptions,
) -> u32 {
    let mut width = cell.width;
    for y in cell.y..cell.y + cell.height {
        for dx in 0..width {
            if options.is_width_marker(source.intensity(cell.x + dx, y)) {
                width = dx;
                break;
            }
        }
    }
    width
}

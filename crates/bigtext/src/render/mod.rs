use std::fmt;
use std::sync::Arc;

use crate::font::braille::BLANK;
use crate::font::table::GlyphTable;
use crate::pixels::source::PixelSource;
use crate::BigTextError;

/// Output of [`TextRenderer::render`] when no font is bound.
pub const NO_FONT_MESSAGE: &str = "error: no font specified";

/// Font to bind to a renderer: a ready table or a sheet to extract one from.
pub enum FontSource {
    Table(Arc<GlyphTable>),
    Pixels(Box<dyn PixelSource>),
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Table(table) => f.debug_tuple("Table").field(table).finish(),
            FontSource::Pixels(source) => {
                f.debug_tuple("Pixels").field(&source.dimensions()).finish()
            },
        }
    }
}

impl From<Arc<GlyphTable>> for FontSource {
    fn from(table: Arc<GlyphTable>) -> Self {
        FontSource::Table(table)
    }
}

impl From<GlyphTable> for FontSource {
    fn from(table: GlyphTable) -> Self {
        FontSource::Table(Arc::new(table))
    }
}

impl FontSource {
    fn resolve(self) -> Result<Arc<GlyphTable>, BigTextError> {
        match self {
            FontSource::Table(table) => Ok(table),
            FontSource::Pixels(source) => GlyphTable::build(&source).map(Arc::new),
        }
    }
}

/// Lays out text with a bound [`GlyphTable`].
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    font: Option<Arc<GlyphTable>>,
}

impl TextRenderer {
    pub fn new(font: Arc<GlyphTable>) -> Self {
        Self { font: Some(font) }
    }

    pub fn bind(&mut self, font: Arc<GlyphTable>) {
        self.font = Some(font);
    }

    pub fn unbind(&mut self) {
        self.font = None;
    }

    /// Resolve `source` and bind it. On error the previous font stays bound.
    pub fn set_font(&mut self, source: impl Into<FontSource>) -> Result<(), BigTextError> {
        self.font = Some(source.into().resolve()?);
        Ok(())
    }

    pub fn font(&self) -> Option<&Arc<GlyphTable>> {
        self.font.as_ref()
    }

    /// Render `text` as Braille rows, one group of `rows_per_glyph` lines per input line.
    ///
    /// Characters without a glyph are skipped and trailing blank cells are trimmed from every
    /// row. Without a bound font this returns [`NO_FONT_MESSAGE`].
    pub fn render(&self, text: &str) -> String {
        let Some(font) = self.font.as_deref() else {
            return NO_FONT_MESSAGE.to_owned();
        };

        let rows_per_glyph = font.rows_per_glyph();
        let mut rows = vec![String::new(); rows_per_glyph];
        let mut row_base = 0;

        for ch in text.chars() {
            if ch == '\n' {
                rows.extend(std::iter::repeat(String::new()).take(rows_per_glyph));
                row_base += rows_per_glyph;
                continue;
            }

            let Some(glyph) = font.glyph_for_char(ch) else {
                continue;
            };
            for (row, glyph_row) in rows[row_base..].iter_mut().zip(glyph.rows()) {
                row.push_str(glyph_row);
            }
        }

        let rows: Vec<&str> = rows.iter().map(|row| row.trim_end_matches(BLANK)).collect();
        rows.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn unbound_renderer_reports_missing_font() {
        let renderer = TextRenderer::default();
        assert_eq!(renderer.render("anything"), NO_FONT_MESSAGE);
    }

    #[test]
    fn set_font_builds_from_pixels() {
        let mut renderer = TextRenderer::default();
        let sheet = GrayImage::from_pixel(32, 48, Luma([255]));
        renderer.set_font(FontSource::Pixels(Box::new(sheet))).unwrap();

        let font = renderer.font().unwrap();
        assert_eq!(font.rows_per_glyph(), 2);
        assert_eq!(renderer.render("hi"), "\n");
    }

    #[test]
    fn failed_set_font_keeps_previous_binding() {
        let table = GlyphTable::build(&GrayImage::from_pixel(32, 24, Luma([255]))).unwrap();
        let table = Arc::new(table);
        let mut renderer = TextRenderer::new(table.clone());

        let bad = GrayImage::from_pixel(31, 24, Luma([255]));
        assert!(renderer.set_font(FontSource::Pixels(Box::new(bad))).is_err());
        assert!(Arc::ptr_eq(renderer.font().unwrap(), &table));
    }

    #[test]
    fn unbind_restores_sentinel() {
        let table = GlyphTable::build(&GrayImage::from_pixel(32, 24, Luma([255]))).unwrap();
        let mut renderer = TextRenderer::default();
        renderer.set_font(table).unwrap();
        assert_eq!(renderer.render("x"), "");

        renderer.unbind();
        assert_eq!(renderer.render("x"), NO_FONT_MESSAGE);
    }
}

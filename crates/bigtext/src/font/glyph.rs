use super::braille::BLANK;

/// One character's Braille rows, all of the same column count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<String>,
    columns: usize,
}

impl Glyph {
    pub fn new(rows: Vec<String>) -> Self {
        let columns = rows.first().map_or(0, |row| row.chars().count());
        debug_assert!(rows.iter().all(|row| row.chars().count() == columns));
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width in Braille characters.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| row.chars().all(|ch| ch == BLANK))
    }
}

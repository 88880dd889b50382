//! Wrapped text height estimation.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Fixed-pitch text metrics.
///
/// Text is wrapped greedily at word boundaries into lines of
/// `floor(width / glyph_width)` display columns, measuring words with
/// `unicode-width` so wide glyphs take two columns. A word longer than a line
/// is broken across as many lines as it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Advance of one display column.
    pub glyph_width: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            glyph_width: 7.0,
            line_height: 17.0,
        }
    }
}

impl TextMetrics {
    /// Create new metrics.
    pub fn new(glyph_width: f64, line_height: f64) -> Self {
        Self {
            glyph_width,
            line_height,
        }
    }

    /// Display columns that fit in `width`. At least 1.
    pub fn columns_for(&self, width: f64) -> usize {
        if self.glyph_width <= 0.0 || !width.is_finite() {
            return 1;
        }
        ((width / self.glyph_width).floor() as usize).max(1)
    }

    /// Number of lines `text` occupies at `width`.
    ///
    /// Empty text occupies no lines. Every explicit line break starts a new line.
    pub fn line_count(&self, text: &str, width: f64) -> usize {
        if text.is_empty() {
            return 0;
        }
        let columns = self.columns_for(width);
        text.lines()
            .map(|paragraph| wrap_paragraph(paragraph, columns))
            .sum::<usize>()
            .max(1)
    }

    /// Height of `text` at `width`.
    pub fn height(&self, text: &str, width: f64) -> f64 {
        self.line_count(text, width) as f64 * self.line_height
    }

    /// Height of the tallest of `texts`, each laid out at `width`.
    pub fn max_height(&self, texts: &[&str], width: f64) -> f64 {
        texts
            .iter()
            .map(|text| self.height(text, width))
            .fold(0.0, f64::max)
    }
}

/// Lines taken by one paragraph (no embedded line breaks).
fn wrap_paragraph(paragraph: &str, columns: usize) -> usize {
    let mut lines = 1;
    let mut used = 0;

    for word in paragraph.split_whitespace() {
        let width = word.width();
        let joined = if used == 0 { width } else { used + 1 + width };
        if joined <= columns {
            used = joined;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        // Overlong words spill across full lines; `used` is what is left on the last one.
        let spill = width.saturating_sub(1) / columns;
        lines += spill;
        used = width - spill * columns;
    }
    lines
}

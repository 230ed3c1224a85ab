//! Built-in 5×7 bitmap glyphs for lowercase letters and digits.
//!
//! Used when no TrueType font is available, and by tests, since its
//! coverage is either 0 or 255 and never depends on the host system.

use crate::glyph::{GlyphMask, GlyphRasterizer};

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;

/// Rows top to bottom; bit 4 is the leftmost column.
type Bitmap = [u8; GLYPH_ROWS as usize];

/// Outline box drawn for characters the table does not cover.
static MISSING: Bitmap = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn bitmap_for(ch: char) -> &'static Bitmap {
    match ch.to_ascii_lowercase() {
        'a' => &[0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => &[0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'c' => &[0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => &[0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        'e' => &[0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => &[0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'g' => &[0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'h' => &[0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'i' => &[0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'j' => &[0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100],
        'k' => &[0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010],
        'l' => &[0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'm' => &[0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        'n' => &[0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => &[0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'p' => &[0b00000, 0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000],
        'q' => &[0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001],
        'r' => &[0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        's' => &[0b00000, 0b00000, 0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        't' => &[0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'u' => &[0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101],
        'v' => &[0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'w' => &[0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010],
        'x' => &[0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'y' => &[0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b10001, 0b01110],
        'z' => &[0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => &MISSING,
    }
}

/// Rasterizer backed by the built-in bitmap table, scaled by whole
/// pixels to fill most of the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapRasterizer;

impl BitmapRasterizer {
    /// Integer scale for a cell size: 12 → 1, 20 → 2, 32 → 4.
    fn scale_for(size: u32) -> u32 {
        ((size + 4) / 9).max(1)
    }
}

impl GlyphRasterizer for BitmapRasterizer {
    fn name(&self) -> &str {
        "builtin-5x7"
    }

    fn rasterize(&self, ch: char, size: u32) -> GlyphMask {
        let scale = Self::scale_for(size);
        let width = GLYPH_COLS * scale;
        let height = GLYPH_ROWS * scale;
        let bitmap = bitmap_for(ch);

        let mut coverage = vec![0u8; (width * height) as usize];
        for y in 0..height {
            let row = bitmap[(y / scale) as usize];
            for x in 0..width {
                let bit = GLYPH_COLS - 1 - x / scale;
                if row >> bit & 1 == 1 {
                    coverage[(y * width + x) as usize] = 255;
                }
            }
        }

        GlyphMask {
            width,
            height,
            left: (size as i32 - width as i32).max(0) / 2,
            top: (size as i32 - height as i32).max(0) / 2,
            coverage,
        }
    }
}

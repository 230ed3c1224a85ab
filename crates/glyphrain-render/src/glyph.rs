//! Glyph alphabet, coverage masks and per-size glyph sets.

use std::sync::Arc;

use glyphrain_core::{Color, FrameBuffer, RainError, RainResult, RainRng};

/// An 8-bit coverage bitmap for one glyph, placed relative to the
/// top-left corner of its `size × size` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    /// Horizontal offset of the bitmap inside the cell.
    pub left: i32,
    /// Vertical offset of the bitmap inside the cell.
    pub top: i32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    /// A mask with no visible pixels.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            left: 0,
            top: 0,
            coverage: Vec::new(),
        }
    }

    /// Number of pixels with non-zero coverage.
    pub fn ink(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0).count()
    }

    /// Blend the glyph onto `canvas` with its cell origin at `(x, y)`.
    ///
    /// Each pixel is drawn in `color` at `opacity` scaled by its coverage.
    /// Anything outside the canvas is clipped.
    pub fn draw(&self, canvas: &mut FrameBuffer, x: i64, y: i64, color: Color, opacity: u8) {
        if opacity == 0 || self.width == 0 || self.height == 0 {
            return;
        }
        let top = y + self.top as i64;
        let left = x + self.left as i64;
        if top >= canvas.height as i64
            || top + self.height as i64 <= 0
            || left >= canvas.width as i64
            || left + self.width as i64 <= 0
        {
            return;
        }

        let width = self.width as usize;
        for (gy, row) in self.coverage.chunks_exact(width).enumerate() {
            let py = top + gy as i64;
            if py < 0 || py >= canvas.height as i64 {
                continue;
            }
            for (gx, &c) in row.iter().enumerate() {
                if c == 0 {
                    continue;
                }
                let alpha = ((c as u32 * opacity as u32 + 127) / 255) as u8;
                canvas.blend_pixel(left + gx as i64, py, color, alpha);
            }
        }
    }
}

/// Turns a character into a coverage mask at a pixel size.
pub trait GlyphRasterizer {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Rasterize `ch` for a `size × size` cell.
    fn rasterize(&self, ch: char, size: u32) -> GlyphMask;
}

/// Uniform random choice from a fixed, shared alphabet.
#[derive(Debug, Clone)]
pub struct GlyphSource {
    alphabet: Arc<[char]>,
}

impl GlyphSource {
    pub fn new(alphabet: &[char]) -> RainResult<Self> {
        if alphabet.is_empty() {
            return Err(RainError::config("glyph alphabet is empty"));
        }
        Ok(Self {
            alphabet: Arc::from(alphabet),
        })
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    /// Position of a uniformly random symbol in the alphabet.
    pub fn pick_index(&self, rng: &mut RainRng) -> usize {
        rng.gen_index(self.alphabet.len())
    }
}

/// An alphabet rasterized once at one cell size.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    size: u32,
    source: GlyphSource,
    masks: Vec<GlyphMask>,
}

impl GlyphSet {
    pub fn build(source: &GlyphSource, rasterizer: &dyn GlyphRasterizer, size: u32) -> Self {
        let masks = source
            .alphabet()
            .iter()
            .map(|&ch| rasterizer.rasterize(ch, size))
            .collect();
        Self {
            size,
            source: source.clone(),
            masks,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// The mask of a uniformly random symbol.
    pub fn pick(&self, rng: &mut RainRng) -> &GlyphMask {
        &self.masks[self.source.pick_index(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap_font::BitmapRasterizer;

    fn solid_mask(w: u32, h: u32) -> GlyphMask {
        GlyphMask {
            width: w,
            height: h,
            left: 0,
            top: 0,
            coverage: vec![255; (w * h) as usize],
        }
    }

    #[test]
    fn test_source_rejects_empty_alphabet() {
        assert!(GlyphSource::new(&[]).is_err());
    }

    #[test]
    fn test_source_covers_alphabet() {
        let source = GlyphSource::new(&['a', 'b', 'c']).unwrap();
        let mut rng = RainRng::new(3);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let ch = source.alphabet()[source.pick_index(&mut rng)];
            seen[(ch as u8 - b'a') as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_mask_draw_clips_partially_visible_glyph() {
        let mut canvas = FrameBuffer::new(4, 4, Color::BLACK);
        solid_mask(2, 2).draw(&mut canvas, -1, -1, Color::WHITE, 255);
        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(0, 1), Some([0, 0, 0]));
    }

    #[test]
    fn test_mask_draw_fully_offscreen_is_noop() {
        let mut canvas = FrameBuffer::new(4, 4, Color::BLACK);
        let before = canvas.clone();
        solid_mask(2, 2).draw(&mut canvas, 0, -700, Color::WHITE, 255);
        solid_mask(2, 2).draw(&mut canvas, 0, 4, Color::WHITE, 255);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_mask_draw_applies_opacity() {
        let mut canvas = FrameBuffer::new(1, 1, Color::BLACK);
        solid_mask(1, 1).draw(&mut canvas, 0, 0, Color::WHITE, 100);
        assert_eq!(canvas.pixel(0, 0), Some([100, 100, 100]));
    }

    #[test]
    fn test_glyph_set_sizes() {
        let source = GlyphSource::new(&['1', '2']).unwrap();
        let set = GlyphSet::build(&source, &BitmapRasterizer, 20);
        assert_eq!(set.size(), 20);
        assert_eq!(set.len(), 2);
        let mut rng = RainRng::new(1);
        assert!(set.pick(&mut rng).ink() > 0);
    }
}

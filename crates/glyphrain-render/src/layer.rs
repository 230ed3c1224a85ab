//! A single depth plane of falling glyph columns.

use glyphrain_core::{Color, FrameBuffer, LayerSpec, RainRng};

use crate::glyph::{GlyphRasterizer, GlyphSet, GlyphSource};

/// A column past the bottom restarts on a tick only when a uniform draw
/// exceeds this.
pub const RESTART_THRESHOLD: f64 = 0.95;
/// Lowest offset a restarted drop can land on.
pub const RESTART_MIN: i64 = -50;
/// Highest offset a restarted drop can land on.
pub const RESTART_MAX: i64 = 0;

/// Independent falling columns sharing one glyph size, speed, color and
/// opacity.
///
/// `drops[i]` is the vertical offset of column `i`'s leading glyph. It
/// grows without bound once a column passes the bottom edge, until the
/// per-tick restart check succeeds, so columns restart out of step with
/// each other.
#[derive(Debug, Clone)]
pub struct RainLayer {
    name: String,
    glyph_size: u32,
    fall_speed: u32,
    color: Color,
    opacity: u8,
    canvas_height: u32,
    pub(crate) drops: Vec<i64>,
    glyphs: GlyphSet,
}

impl RainLayer {
    /// Build a layer covering a `canvas_width × canvas_height` canvas.
    ///
    /// There is one column per whole glyph cell across the width; every
    /// drop starts uniformly in `[-canvas_height, 0]`.
    pub fn new(
        spec: &LayerSpec,
        canvas_width: u32,
        canvas_height: u32,
        source: &GlyphSource,
        rasterizer: &dyn GlyphRasterizer,
        rng: &mut RainRng,
    ) -> Self {
        let columns = (canvas_width / spec.glyph_size) as usize;
        let drops = (0..columns)
            .map(|_| rng.gen_range_i64(-(canvas_height as i64), 0))
            .collect();
        let glyphs = GlyphSet::build(source, rasterizer, spec.glyph_size);

        tracing::debug!(
            "Layer '{}': {} columns, {}px glyphs, {}px/tick, color {}, opacity {}",
            spec.name,
            columns,
            spec.glyph_size,
            spec.fall_speed,
            spec.color,
            spec.opacity
        );

        Self {
            name: spec.name.clone(),
            glyph_size: spec.glyph_size,
            fall_speed: spec.fall_speed,
            color: spec.color,
            opacity: spec.opacity,
            canvas_height,
            drops,
            glyphs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph_size(&self) -> u32 {
        self.glyph_size
    }

    pub fn fall_speed(&self) -> u32 {
        self.fall_speed
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Number of columns, fixed at construction.
    pub fn column_count(&self) -> usize {
        self.drops.len()
    }

    /// Current leading-glyph offset of every column.
    pub fn drops(&self) -> &[i64] {
        &self.drops
    }

    /// Draw one random glyph at the head of every column, then move each
    /// column down by the fall speed or, if it is below the bottom edge
    /// and the restart check passes, back to just above the top.
    pub fn advance_and_render(&mut self, canvas: &mut FrameBuffer, rng: &mut RainRng) {
        let height = self.canvas_height as i64;
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let x = i as i64 * self.glyph_size as i64;
            self.glyphs
                .pick(rng)
                .draw(canvas, x, *drop, self.color, self.opacity);

            if *drop > height && rng.gen_f64() > RESTART_THRESHOLD {
                *drop = rng.gen_range_i64(RESTART_MIN, RESTART_MAX);
            } else {
                *drop += self.fall_speed as i64;
            }
        }
    }
}

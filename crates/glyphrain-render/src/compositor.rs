//! Per-tick compositing: a persistence fade followed by the layer stack.

use glyphrain_core::{Color, FrameBuffer, RainRng};

use crate::layer::RainLayer;

/// A constant full-canvas plane of the background color, blended at a
/// low opacity each tick so earlier glyphs decay into trails instead of
/// being cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeOverlay {
    color: Color,
    alpha: u8,
}

impl FadeOverlay {
    pub fn new(color: Color, alpha: u8) -> Self {
        Self { color, alpha }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Blend the overlay over every pixel of `canvas`. Each channel moves
    /// toward the overlay color and never past it.
    pub fn apply(&self, canvas: &mut FrameBuffer) {
        canvas.fill_over(self.color, self.alpha);
    }
}

/// The fade pass plus an ordered stack of rain layers.
///
/// Layers are kept back-to-front: index 0 is the most distant and is drawn
/// first, the last layer is the nearest and is drawn over everything else.
#[derive(Debug, Clone)]
pub struct FrameCompositor {
    fade: FadeOverlay,
    layers: Vec<RainLayer>,
}

impl FrameCompositor {
    /// `layers` must already be ordered back-to-front.
    pub fn new(fade: FadeOverlay, layers: Vec<RainLayer>) -> Self {
        Self { fade, layers }
    }

    pub fn fade(&self) -> &FadeOverlay {
        &self.fade
    }

    pub fn layers(&self) -> &[RainLayer] {
        &self.layers
    }

    /// Produce the next frame on `canvas`: fade what is there, then advance
    /// and draw every layer from farthest to nearest.
    pub fn composite(&mut self, canvas: &mut FrameBuffer, rng: &mut RainRng) {
        self.fade.apply(canvas);
        for layer in &mut self.layers {
            layer.advance_and_render(canvas, rng);
        }
    }
}

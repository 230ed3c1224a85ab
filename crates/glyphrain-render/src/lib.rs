//! # glyphrain-render
//!
//! Frame generation for the digital rain animation. Glyphs are rasterized
//! once per layer, each tick fades the canvas and draws every layer
//! back-to-front, and the driver captures one frame per tick for export.
//! Single-threaded and CPU-only.

pub mod bitmap_font;
pub mod compositor;
pub mod driver;
pub mod glyph;
pub mod layer;
pub mod text;

pub use bitmap_font::BitmapRasterizer;
pub use compositor::{FadeOverlay, FrameCompositor};
pub use driver::{AnimationDriver, DriverState, FrameHost, RunOutcome};
pub use glyph::{GlyphMask, GlyphRasterizer, GlyphSet, GlyphSource};
pub use layer::RainLayer;
pub use text::{resolve_rasterizer, FontRasterizer};

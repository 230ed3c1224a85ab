use crate::color::blend_channel;
use crate::Color;

/// Bytes per pixel of every frame buffer (8-bit RGB, no alpha).
pub const BYTES_PER_PIXEL: usize = 3;

/// An opaque RGB raster surface as a raw pixel buffer.
///
/// The animation canvas is one of these; captured snapshots are plain
/// clones of it. Transparency only exists while blending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data, row-major, 3 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Create a frame buffer filled with a solid color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let pixel = fill.to_array();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The RGB value at a signed pixel coordinate, or `None` outside the
    /// buffer.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        let offset = self.offset(x, y)?;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Blend `color` at `alpha` over the pixel at a signed coordinate.
    /// Coordinates outside the buffer are clipped silently.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let Some(dst) = self.pixel(x, y) else {
            return;
        };
        let offset = self.index(x as u32, y as u32);
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.over(dst, alpha));
    }

    /// Blend a solid full-buffer plane of `color` at `alpha` over every
    /// pixel. Every channel that differs from `color` moves at least one
    /// step toward it, so repeated fills always reach `color` exactly.
    pub fn fill_over(&mut self, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let src = color.to_array();
        for px in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            for (d, s) in px.iter_mut().zip(src) {
                *d = blend_channel(s, *d, alpha);
            }
        }
    }

    /// Copy out the pixel data as opaque RGBA, the layout image encoders
    /// expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for px in self.data.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(px);
            out.push(255);
        }
        out
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.index(x as u32, y as u32))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }
}

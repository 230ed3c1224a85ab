use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque 8-bit RGB color. Transparency is carried separately as an
/// alpha value when a color is blended onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in RGB order.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Blend `self` over `dst` with the given alpha (0 = keep `dst`,
    /// 255 = replace with `self`).
    ///
    /// Each output channel lies between the two inputs, inclusive, and is
    /// rounded toward `self`.
    pub fn over(self, dst: [u8; 3], alpha: u8) -> [u8; 3] {
        let src = self.to_array();
        [
            blend_channel(src[0], dst[0], alpha),
            blend_channel(src[1], dst[1], alpha),
            blend_channel(src[2], dst[2], alpha),
        ]
    }

    // --- Named constants ---

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Bright rain green used by the nearest layer.
    pub const GREEN_BRIGHT: Color = Color::rgb(0, 255, 70);
    /// Mid-depth rain green.
    pub const GREEN_MID: Color = Color::rgb(0, 180, 50);
    /// Dim rain green used by the most distant layer.
    pub const GREEN_DIM: Color = Color::rgb(0, 100, 0);
}

/// `src * a + dst * (1 - a)` in 8-bit fixed point, rounded toward `src`.
///
/// With any non-zero alpha a channel that differs from `src` moves at
/// least one step, so repeated blends converge on `src` exactly.
#[inline]
pub fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    let mixed = src as u32 * a + dst as u32 * (255 - a);
    if src >= dst {
        ((mixed + 254) / 255) as u8
    } else {
        (mixed / 255) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend_channel(200, 10, 255), 200);
        assert_eq!(blend_channel(200, 10, 0), 10);
    }

    #[test]
    fn test_blend_stays_between_inputs() {
        for alpha in [1u8, 30, 100, 128, 180, 254] {
            for dst in (0..=255u8).step_by(17) {
                for src in [0u8, 70, 255] {
                    let out = blend_channel(src, dst, alpha);
                    assert!(out >= src.min(dst) && out <= src.max(dst));
                }
            }
        }
    }

    #[test]
    fn test_blend_always_steps_toward_src() {
        for alpha in [1u8, 30, 200] {
            for v in 1..=255u8 {
                assert!(blend_channel(0, v, alpha) < v, "stuck at {v} (alpha {alpha})");
                assert!(blend_channel(255, v - 1, alpha) > v - 1);
            }
        }
        assert_eq!(blend_channel(0, 4, 30), 3);
        assert_eq!(blend_channel(0, 1, 30), 0);
        assert_eq!(blend_channel(90, 90, 30), 90);
    }

    #[test]
    fn test_color_over() {
        let out = Color::GREEN_BRIGHT.over([0, 0, 0], 255);
        assert_eq!(out, [0, 255, 70]);
        let half = Color::WHITE.over([0, 0, 0], 128);
        assert_eq!(half, [128, 128, 128]);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::RED), "#FF0000");
        assert_eq!(format!("{}", Color::GREEN_MID), "#00B432");
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Color, RainError, RainResult};

/// Canvas width of the reference animation.
pub const REFERENCE_WIDTH: u32 = 1200;
/// Canvas height of the reference animation.
pub const REFERENCE_HEIGHT: u32 = 720;
/// Ticks per second.
pub const REFERENCE_FPS: u32 = 30;
/// Animation length in seconds.
pub const REFERENCE_DURATION_SECONDS: u32 = 3;
/// Output file written by a default run.
pub const REFERENCE_OUTPUT: &str = "matrix_rain_perspective.gif";
/// Opacity of the per-tick fade plane. Lower values give longer trails.
pub const REFERENCE_FADE_ALPHA: u8 = 30;
/// Lowercase latin letters and digits.
pub const REFERENCE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890";
/// Upper bound on the number of depth layers in one stack.
pub const MAX_LAYERS: usize = 8;

/// One depth plane of falling glyph columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Label used in logs.
    pub name: String,
    /// Pixel width and height of one glyph cell.
    pub glyph_size: u32,
    /// Pixels a column's drop advances per tick.
    pub fall_speed: u32,
    /// Glyph tint.
    pub color: Color,
    /// Glyph opacity; smaller reads as farther away.
    pub opacity: u8,
}

impl LayerSpec {
    pub fn new(
        name: impl Into<String>,
        glyph_size: u32,
        fall_speed: u32,
        color: Color,
        opacity: u8,
    ) -> Self {
        Self {
            name: name.into(),
            glyph_size,
            fall_speed,
            color,
            opacity,
        }
    }
}

/// Immutable description of one animation run, built once at startup.
///
/// `layers` is ordered back-to-front: the first entry is drawn first and
/// is the most distant, the last entry is drawn last and occludes the
/// rest. [`AnimationConfig::validate`] enforces this through non-decreasing
/// opacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_seconds: u32,
    pub seed: u64,
    /// Canvas clear color and the color of the fade plane.
    pub background: Color,
    pub fade_alpha: u8,
    pub alphabet: String,
    pub layers: Vec<LayerSpec>,
    pub output_path: PathBuf,
}

impl AnimationConfig {
    /// The three-layer 1200×720, 30 fps, 3 second configuration.
    pub fn reference(seed: u64) -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            fps: REFERENCE_FPS,
            duration_seconds: REFERENCE_DURATION_SECONDS,
            seed,
            background: Color::BLACK,
            fade_alpha: REFERENCE_FADE_ALPHA,
            alphabet: REFERENCE_ALPHABET.to_string(),
            layers: vec![
                LayerSpec::new("background", 12, 3, Color::GREEN_DIM, 100),
                LayerSpec::new("midground", 20, 6, Color::GREEN_MID, 180),
                LayerSpec::new("foreground", 32, 10, Color::GREEN_BRIGHT, 255),
            ],
            output_path: PathBuf::from(REFERENCE_OUTPUT),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Number of ticks a full, uncancelled run produces.
    pub fn target_frame_count(&self) -> u64 {
        self.fps as u64 * self.duration_seconds as u64
    }

    /// Per-frame display time in whole milliseconds (truncating).
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }

    /// The alphabet as a list of glyphs.
    pub fn glyphs(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }

    /// Check the configuration before any resource is allocated.
    pub fn validate(&self) -> RainResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RainError::config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(RainError::config("fps must be positive"));
        }
        if self.duration_seconds == 0 {
            return Err(RainError::config("duration must be positive"));
        }
        if self.alphabet.is_empty() {
            return Err(RainError::config("glyph alphabet is empty"));
        }
        if self.layers.is_empty() {
            return Err(RainError::config("at least one layer is required"));
        }
        if self.layers.len() > MAX_LAYERS {
            return Err(RainError::config(format!(
                "{} layers requested, at most {} supported",
                self.layers.len(),
                MAX_LAYERS
            )));
        }

        for layer in &self.layers {
            if layer.glyph_size == 0 {
                return Err(RainError::config(format!(
                    "layer '{}': glyph size must be positive",
                    layer.name
                )));
            }
            if layer.glyph_size > self.width {
                return Err(RainError::config(format!(
                    "layer '{}': glyph size {} is wider than the {}px canvas",
                    layer.name, layer.glyph_size, self.width
                )));
            }
            if layer.fall_speed == 0 {
                return Err(RainError::config(format!(
                    "layer '{}': fall speed must be positive",
                    layer.name
                )));
            }
        }

        for pair in self.layers.windows(2) {
            if pair[1].opacity < pair[0].opacity {
                return Err(RainError::config(format!(
                    "layers must be ordered back-to-front: '{}' (opacity {}) is drawn after '{}' (opacity {})",
                    pair[1].name, pair[1].opacity, pair[0].name, pair[0].opacity
                )));
            }
        }

        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::reference(0)
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glyphrain_core::{ExportSettings, Exporter, FrameBuffer, RainError, RainResult};

/// Default NeuQuant sampling speed (1 = best quality, 30 = fastest).
pub const DEFAULT_SPEED: i32 = 10;

/// Native GIF encoder using the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct GifEncoder {
    speed: i32,
}

impl GifEncoder {
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }

    /// Trade palette quality for encoding time; clamped to `1..=30`.
    pub fn with_speed(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 30),
        }
    }

    /// Check that the sequence is non-empty and every frame matches the
    /// first frame's dimensions. Returns those dimensions.
    pub fn validate(frames: &[FrameBuffer]) -> RainResult<(u32, u32)> {
        let first = frames
            .first()
            .ok_or_else(|| RainError::Encode("no frames to encode for GIF".into()))?;
        let (width, height) = (first.width, first.height);
        for (i, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(RainError::Encode(format!(
                    "frame {} has dimensions {}x{}, expected {}x{}",
                    i, frame.width, frame.height, width, height
                )));
            }
        }
        Ok((width, height))
    }

    /// Encode a sequence of frames to an animated GIF.
    ///
    /// # Arguments
    /// * `frames` - Ordered, non-empty sequence of equally sized frames
    /// * `frame_delay_ms` - Display time of each frame
    /// * `loop_forever` - Repeat indefinitely, otherwise play once
    /// * `output_path` - Path for the output .gif file
    pub fn encode(
        &self,
        frames: &[FrameBuffer],
        frame_delay_ms: u32,
        loop_forever: bool,
        output_path: &Path,
    ) -> RainResult<()> {
        let (width, height) = Self::validate(frames)?;

        // Ensure output directory exists
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(output_path)
            .map_err(|e| RainError::Encode(format!("failed to create GIF file: {}", e)))?;
        let mut writer = BufWriter::new(file);

        {
            let mut encoder =
                image::codecs::gif::GifEncoder::new_with_speed(&mut writer, self.speed);

            // Without a repeat extension a GIF plays once.
            if loop_forever {
                encoder
                    .set_repeat(image::codecs::gif::Repeat::Infinite)
                    .map_err(|e| RainError::Encode(format!("failed to set GIF repeat: {}", e)))?;
            }

            let delay = image::Delay::from_numer_denom_ms(frame_delay_ms, 1);
            for (i, frame) in frames.iter().enumerate() {
                let rgba = image::RgbaImage::from_raw(width, height, frame.to_rgba8())
                    .ok_or_else(|| {
                        RainError::Encode(format!("invalid frame data at frame {}", i))
                    })?;
                encoder
                    .encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))
                    .map_err(|e| {
                        RainError::Encode(format!("failed to encode GIF frame {}: {}", i, e))
                    })?;
                tracing::trace!("Encoded GIF frame {}/{}", i + 1, frames.len());
            }
            // Dropping the encoder writes the GIF trailer.
        }
        writer
            .flush()
            .map_err(|e| RainError::Encode(format!("failed to write GIF file: {}", e)))?;

        tracing::info!(
            "Encoded {} frames to GIF at {} ({}x{}, delay={}ms, loop={})",
            frames.len(),
            output_path.display(),
            width,
            height,
            frame_delay_ms,
            loop_forever,
        );

        Ok(())
    }
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for GifEncoder {
    fn export(&mut self, frames: &[FrameBuffer], settings: &ExportSettings) -> RainResult<()> {
        self.encode(
            frames,
            settings.frame_delay_ms,
            settings.loop_forever,
            &settings.output_path,
        )
    }
}

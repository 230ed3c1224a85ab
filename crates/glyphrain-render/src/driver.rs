//! The animation driver: owns the canvas and layer stack, runs the fixed
//! number of ticks, and hands the captured frames to an exporter.

use std::time::{Duration, Instant};

use glyphrain_core::hash::{self, ContentHash};
use glyphrain_core::{
    AnimationConfig, ExportSettings, Exporter, FrameBuffer, RainError, RainResult,
    RainRng,
};

use crate::compositor::{FadeOverlay, FrameCompositor};
use crate::glyph::{GlyphRasterizer, GlyphSource};
use crate::layer::RainLayer;

/// The presentation side of a run: cancellation, preview and pacing.
pub trait FrameHost {
    /// Checked once at the start of every tick; `true` ends generation.
    fn poll_cancelled(&mut self) -> bool;

    /// Show the frame just composited. Optional.
    fn present(&mut self, _frame: &FrameBuffer, _tick: u64) {}

    /// Wait as needed to hold the loop near the target frame rate.
    fn pace(&mut self) {}
}

/// Lifecycle of a driver. Transitions are strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Running,
    Finalizing,
    Done,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub seed: u64,
    pub target_frames: u64,
    pub frames_captured: u64,
    /// Generation stopped early because the host asked it to.
    pub cancelled: bool,
    /// Frames were handed to the exporter.
    pub exported: bool,
    pub content_hash: ContentHash,
    pub generation_time: Duration,
    pub export_time: Duration,
}

/// Runs one animation from a validated configuration.
pub struct AnimationDriver {
    config: AnimationConfig,
    state: DriverState,
    canvas: FrameBuffer,
    compositor: FrameCompositor,
    rng: RainRng,
    frames: Vec<FrameBuffer>,
}

impl AnimationDriver {
    /// Validate `config`, allocate the canvas and build the layer stack in
    /// config order (back-to-front).
    pub fn new(config: AnimationConfig, rasterizer: &dyn GlyphRasterizer) -> RainResult<Self> {
        config.validate()?;
        tracing::debug!("Driver state: {:?}", DriverState::Initializing);

        let mut rng = RainRng::new(config.seed);
        let source = GlyphSource::new(&config.glyphs())?;
        let canvas = FrameBuffer::new(config.width, config.height, config.background);

        let layers = config
            .layers
            .iter()
            .map(|spec| {
                RainLayer::new(
                    spec,
                    config.width,
                    config.height,
                    &source,
                    rasterizer,
                    &mut rng,
                )
            })
            .collect();
        let fade = FadeOverlay::new(config.background, config.fade_alpha);

        tracing::info!(
            "Prepared {} layers on a {}x{} canvas (glyphs: {}, seed: {})",
            config.layers.len(),
            config.width,
            config.height,
            rasterizer.name(),
            config.seed
        );

        Ok(Self {
            state: DriverState::Initializing,
            canvas,
            compositor: FrameCompositor::new(fade, layers),
            rng,
            frames: Vec::with_capacity(config.target_frame_count() as usize),
            config,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    /// Frames captured so far, in order.
    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }

    /// Release the captured frames.
    pub fn into_frames(self) -> Vec<FrameBuffer> {
        self.frames
    }

    fn transition(&mut self, next: DriverState) {
        tracing::debug!("Driver state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Generate up to `target_frame_count` frames, then export them.
    ///
    /// The host is polled before each tick; a cancellation stops the loop
    /// and whatever was captured is still exported. An empty sequence is
    /// never exported. Exporter failures are returned as-is.
    pub fn run(
        &mut self,
        host: &mut dyn FrameHost,
        exporter: &mut dyn Exporter,
    ) -> RainResult<RunOutcome> {
        if self.state != DriverState::Initializing {
            return Err(RainError::Render(format!(
                "driver already ran (state: {:?})",
                self.state
            )));
        }

        let target = self.config.target_frame_count();
        self.transition(DriverState::Running);
        tracing::info!("Generating {} frames...", target);

        let generation_start = Instant::now();
        let mut cancelled = false;
        for tick in 0..target {
            if host.poll_cancelled() {
                tracing::info!("Cancelled after {} of {} frames", tick, target);
                cancelled = true;
                break;
            }

            self.compositor.composite(&mut self.canvas, &mut self.rng);
            host.present(&self.canvas, tick);
            self.frames.push(self.canvas.clone());
            tracing::trace!("Captured frame {}/{}", tick + 1, target);
            host.pace();
        }
        let generation_time = generation_start.elapsed();

        self.transition(DriverState::Finalizing);
        let content_hash = hash::hash_frames(&self.frames);
        let export_start = Instant::now();
        let exported = if self.frames.is_empty() {
            tracing::warn!("No frames captured, skipping export");
            false
        } else {
            let settings = ExportSettings {
                frame_delay_ms: self.config.frame_delay_ms(),
                loop_forever: true,
                output_path: self.config.output_path.clone(),
            };
            tracing::info!(
                "Exporting {} frames to {}",
                self.frames.len(),
                settings.output_path.display()
            );
            exporter.export(&self.frames, &settings)?;
            true
        };
        let export_time = export_start.elapsed();

        self.transition(DriverState::Done);
        Ok(RunOutcome {
            seed: self.config.seed,
            target_frames: target,
            frames_captured: self.frames.len() as u64,
            cancelled,
            exported,
            content_hash,
            generation_time,
            export_time,
        })
    }
}

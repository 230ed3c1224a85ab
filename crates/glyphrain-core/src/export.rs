//! The export seam between frame generation and file encoding.

use std::path::PathBuf;

use crate::frame::FrameBuffer;
use crate::RainResult;

/// Encoding parameters handed to an [`Exporter`] along with the frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Display time of each frame, in whole milliseconds.
    pub frame_delay_ms: u32,
    /// Whether the animation repeats indefinitely.
    pub loop_forever: bool,
    /// Destination file.
    pub output_path: PathBuf,
}

/// Encodes an ordered frame sequence into a single animation file.
///
/// Implementations must reject an empty sequence and frames whose
/// dimensions differ from the first one.
pub trait Exporter {
    fn export(&mut self, frames: &[FrameBuffer], settings: &ExportSettings) -> RainResult<()>;
}

//! # glyphrain-core
//!
//! Core types shared by every glyphrain crate: raster frames, colors,
//! the run configuration, the seeded RNG, content hashing, the export
//! seam and the error type.

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod hash;
pub mod rng;

pub use config::*;

pub use color::Color;
pub use error::{RainError, RainResult};
pub use export::{ExportSettings, Exporter};
pub use frame::FrameBuffer;
pub use hash::ContentHash;
pub use rng::RainRng;

//! # glyphrain-encode
//!
//! Encoding module: converts captured frame buffers into the exported
//! animation file.

pub mod gif;

pub use gif::GifEncoder;

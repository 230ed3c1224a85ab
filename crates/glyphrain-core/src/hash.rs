//! Content hashing for deterministic generation checks.
//!
//! A SHA-256 digest over a frame sequence identifies a run's output: the
//! same configuration and seed always hash to the same value.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn update_with_frame(hasher: &mut Sha256, frame: &FrameBuffer) {
    // Dimensions are part of the digest so equal bytes at a different
    // size never collide.
    hasher.update(frame.width.to_le_bytes());
    hasher.update(frame.height.to_le_bytes());
    hasher.update(&frame.data);
}

/// Compute the content hash of a whole frame sequence.
pub fn hash_frames(frames: &[FrameBuffer]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((frames.len() as u64).to_le_bytes());
    for frame in frames {
        update_with_frame(&mut hasher, frame);
    }
    finish(hasher)
}

fn finish(hasher: Sha256) -> ContentHash {
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    ContentHash::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_hash_deterministic() {
        let frame1 = FrameBuffer::new(10, 10, Color::RED);
        let frame2 = FrameBuffer::new(10, 10, Color::RED);
        assert_eq!(hash_frames(&[frame1]), hash_frames(&[frame2]));
    }

    #[test]
    fn test_hash_different_content() {
        let frame1 = FrameBuffer::new(10, 10, Color::RED);
        let frame2 = FrameBuffer::new(10, 10, Color::BLUE);
        assert_ne!(hash_frames(&[frame1]), hash_frames(&[frame2]));
    }

    #[test]
    fn test_hash_different_size() {
        let frame1 = FrameBuffer::new(10, 10, Color::RED);
        let frame2 = FrameBuffer::new(20, 5, Color::RED);
        assert_ne!(hash_frames(&[frame1]), hash_frames(&[frame2]));
    }

    #[test]
    fn test_hash_sequence_order_matters() {
        let a = FrameBuffer::new(4, 4, Color::RED);
        let b = FrameBuffer::new(4, 4, Color::GREEN);
        assert_eq!(
            hash_frames(&[a.clone(), b.clone()]),
            hash_frames(&[a.clone(), b.clone()])
        );
        assert_ne!(hash_frames(&[a.clone(), b.clone()]), hash_frames(&[b, a]));
    }

    #[test]
    fn test_hash_hex_format() {
        let hash = hash_frames(&[]);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(format!("{}", hash), hex);
    }
}

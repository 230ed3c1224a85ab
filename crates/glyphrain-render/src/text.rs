//! TrueType glyph rasterization.
//! Uses fontdue for CPU-based font rasterization, with the built-in bitmap
//! glyphs as the fallback when no font can be found.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use glyphrain_core::{RainError, RainResult};

use crate::bitmap_font::BitmapRasterizer;
use crate::glyph::{GlyphMask, GlyphRasterizer};

/// Bold sans-serif faces probed, in order, when no font is given.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Rasterizer backed by a TrueType/OpenType font file.
pub struct FontRasterizer {
    font: Font,
    name: String,
}

impl FontRasterizer {
    /// Load a font from a file path.
    pub fn load(path: &Path) -> RainResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| RainError::asset(format!("failed to read font file: {}", e), path))?;
        Self::from_bytes(data, path)
    }

    fn from_bytes(data: Vec<u8>, path: &Path) -> RainResult<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| RainError::asset(format!("failed to parse font: {}", e), path))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { font, name })
    }

    /// Try the well-known system font locations and return the first one
    /// that loads.
    pub fn from_system() -> Option<Self> {
        SYSTEM_FONT_CANDIDATES
            .iter()
            .map(|p| PathBuf::from(*p))
            .filter(|p| p.is_file())
            .find_map(|p| match Self::load(&p) {
                Ok(font) => Some(font),
                Err(e) => {
                    tracing::debug!("skipping system font: {}", e);
                    None
                }
            })
    }

    /// Distance from the top of a `size` cell to the baseline.
    fn ascent(&self, size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size * 0.8)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(&self, ch: char, size: u32) -> GlyphMask {
        let px = size as f32;
        let (metrics, bitmap) = self.font.rasterize(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return GlyphMask::empty();
        }
        let baseline = self.ascent(px).round() as i32;
        GlyphMask {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            top: baseline - (metrics.height as i32 + metrics.ymin),
            coverage: bitmap,
        }
    }
}

/// Pick the glyph rasterizer for a run.
///
/// An explicit font path must load, otherwise the run fails before any
/// frame is generated. Without one, system fonts are probed and the
/// built-in bitmap glyphs are used if none is usable.
pub fn resolve_rasterizer(font_path: Option<&Path>) -> RainResult<Box<dyn GlyphRasterizer>> {
    if let Some(path) = font_path {
        let font = FontRasterizer::load(path)?;
        tracing::info!("Using font {}", path.display());
        return Ok(Box::new(font));
    }

    match FontRasterizer::from_system() {
        Some(font) => {
            tracing::info!("Using system font {}", font.name());
            Ok(Box::new(font))
        }
        None => {
            tracing::warn!("No system font found, falling back to built-in bitmap glyphs");
            Ok(Box::new(BitmapRasterizer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_font() {
        let result = FontRasterizer::load(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(RainError::Asset { .. })));
    }

    #[test]
    fn test_load_invalid_font() {
        let path = std::env::temp_dir().join("glyphrain_not_a_font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let result = FontRasterizer::load(&path);
        assert!(result.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_font_failure_is_fatal() {
        let result = resolve_rasterizer(Some(Path::new("/nonexistent/font.ttf")));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_without_font_always_succeeds() {
        let rasterizer = resolve_rasterizer(None).unwrap();
        let mask = rasterizer.rasterize('8', 32);
        assert!(mask.ink() > 0, "{} produced an empty glyph", rasterizer.name());
    }

    #[test]
    fn test_system_font_glyphs_fit_near_cell() {
        // Only meaningful on hosts that have one of the probed fonts.
        let Some(font) = FontRasterizer::from_system() else {
            return;
        };
        let mask = font.rasterize('a', 20);
        assert!(mask.ink() > 0);
        assert!(mask.top >= -2 && mask.top < 20);
        assert!(font.rasterize(' ', 20).ink() == 0);
    }
}

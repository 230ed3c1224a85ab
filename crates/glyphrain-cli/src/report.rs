use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use glyphrain_core::{AnimationConfig, LayerSpec};
use glyphrain_render::RunOutcome;

/// Machine-readable summary of one run, written with `--report`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub target_frames: u64,
    pub frames_captured: u64,
    pub cancelled: bool,
    pub exported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// `sha256:<hex>` over the captured frames.
    pub content_hash: String,
    pub generation_ms: u64,
    pub export_ms: u64,
    pub layers: Vec<LayerSpec>,
}

impl RunReport {
    pub fn new(config: &AnimationConfig, outcome: &RunOutcome) -> Self {
        Self {
            seed: outcome.seed,
            width: config.width,
            height: config.height,
            fps: config.fps,
            target_frames: outcome.target_frames,
            frames_captured: outcome.frames_captured,
            cancelled: outcome.cancelled,
            exported: outcome.exported,
            output_path: outcome
                .exported
                .then(|| config.output_path.display().to_string()),
            content_hash: format!("sha256:{}", outcome.content_hash),
            generation_ms: outcome.generation_time.as_millis() as u64,
            export_ms: outcome.export_time.as_millis() as u64,
            layers: config.layers.clone(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
        tracing::info!("Wrote run report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrain_core::hash::hash_frames;
    use std::time::Duration;

    fn outcome(exported: bool) -> RunOutcome {
        RunOutcome {
            seed: 77,
            target_frames: 90,
            frames_captured: if exported { 12 } else { 0 },
            cancelled: true,
            exported,
            content_hash: hash_frames(&[]),
            generation_time: Duration::from_millis(1500),
            export_time: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_report_fields() {
        let config = AnimationConfig::reference(77);
        let report = RunReport::new(&config, &outcome(true));
        assert_eq!(report.frames_captured, 12);
        assert_eq!(report.generation_ms, 1500);
        assert_eq!(report.output_path.as_deref(), Some("matrix_rain_perspective.gif"));
        assert!(report.content_hash.starts_with("sha256:"));
        assert_eq!(report.layers.len(), 3);
    }

    #[test]
    fn test_report_omits_output_when_not_exported() {
        let config = AnimationConfig::reference(77);
        let report = RunReport::new(&config, &outcome(false));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("output_path").is_none());
        assert_eq!(json["exported"], false);
    }

    #[test]
    fn test_report_write_roundtrip() {
        let config = AnimationConfig::reference(77);
        let report = RunReport::new(&config, &outcome(true));
        let path = std::env::temp_dir().join("glyphrain_test_report.json");
        report.write(&path).unwrap();

        let parsed: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.seed, 77);
        assert_eq!(parsed.content_hash, report.content_hash);
        let _ = std::fs::remove_file(&path);
    }
}

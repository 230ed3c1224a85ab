mod host;
mod report;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use glyphrain_core::{AnimationConfig, RainRng, REFERENCE_OUTPUT};
use glyphrain_encode::GifEncoder;
use glyphrain_render::AnimationDriver;

use crate::host::CliHost;
use crate::report::RunReport;

#[derive(Parser)]
#[command(
    name = "glyphrain",
    version,
    about = "glyphrain: layered digital rain, rendered to a looping GIF",
    long_about = "Generates a 3 second, 30 fps, 1200x720 animation of three parallax layers of\nfalling glyphs with fading trails, and saves it as a looping GIF.\n\nPress Ctrl-C to stop early; the frames generated so far are still saved."
)]
struct Cli {
    /// Seed for the random generator (default: drawn from the OS)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path
    #[arg(short, long, default_value = REFERENCE_OUTPUT)]
    output: PathBuf,

    /// TrueType/OpenType font for the glyphs (default: probe system fonts)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Generate frames as fast as possible instead of at the frame rate
    #[arg(long)]
    no_pace: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cancel = Arc::new(AtomicBool::new(false));
    let listener = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::warn!("Interrupt received, stopping after the current frame");
        listener.store(true, Ordering::Relaxed);

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Second interrupt, aborting");
            std::process::exit(130);
        }
    });

    // Generation is synchronous; keep it off the async workers.
    tokio::task::spawn_blocking(move || generate(cli, cancel))
        .await
        .context("generation task panicked")?
}

fn generate(cli: Cli, cancel: Arc<AtomicBool>) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(RainRng::entropy_seed);
    let config = AnimationConfig::reference(seed).with_output(&cli.output);

    let rasterizer = glyphrain_render::resolve_rasterizer(cli.font.as_deref())
        .context("failed to load glyph font")?;
    let mut driver = AnimationDriver::new(config.clone(), rasterizer.as_ref())
        .context("failed to initialize animation")?;

    let mut host = CliHost::new(cancel, config.fps, config.target_frame_count(), !cli.no_pace);
    let mut exporter = GifEncoder::new();

    println!(
        "Generating {} frames (seed {}). Please wait...",
        config.target_frame_count(),
        seed
    );
    let outcome = driver
        .run(&mut host, &mut exporter)
        .with_context(|| format!("failed to produce {}", config.output_path.display()))?;

    println!(
        "   ✓ Generated {} frames in {:.1}ms{}",
        outcome.frames_captured,
        outcome.generation_time.as_secs_f64() * 1000.0,
        if outcome.cancelled { " (stopped early)" } else { "" }
    );
    if outcome.exported {
        println!(
            "   ✓ Encoded to {} in {:.1}ms",
            config.output_path.display(),
            outcome.export_time.as_secs_f64() * 1000.0
        );
    } else {
        println!("   No frames were generated, nothing saved.");
    }

    if let Some(path) = &cli.report {
        RunReport::new(&config, &outcome).write(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_the_reference_run() {
        let cli = Cli::try_parse_from(["glyphrain"]).unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.output, PathBuf::from(REFERENCE_OUTPUT));
        assert!(cli.font.is_none());
        assert!(!cli.no_pace);
        assert!(cli.report.is_none());

        let config = AnimationConfig::reference(0).with_output(&cli.output);
        assert_eq!(config, AnimationConfig::reference(0));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "glyphrain", "--seed", "42", "-o", "out.gif", "--no-pace", "--report", "r.json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.output, PathBuf::from("out.gif"));
        assert!(cli.no_pace);
        assert_eq!(cli.report, Some(PathBuf::from("r.json")));
    }
}

//! The CLI's frame host: Ctrl-C cancellation, frame pacing and progress
//! logging. There is no window; presenting a frame only reports progress.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glyphrain_core::FrameBuffer;
use glyphrain_render::FrameHost;

/// Caps a loop to a tick rate by sleeping off whatever is left of each
/// tick's interval. Best-effort: a slow tick is never made up for.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until at least one interval has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

pub struct CliHost {
    cancel: Arc<AtomicBool>,
    pacer: Option<FramePacer>,
    fps: u32,
    target_frames: u64,
}

impl CliHost {
    /// `cancel` is raised by the interrupt listener. Without pacing the loop
    /// runs as fast as it can.
    pub fn new(cancel: Arc<AtomicBool>, fps: u32, target_frames: u64, pace: bool) -> Self {
        Self {
            cancel,
            pacer: pace.then(|| FramePacer::new(fps)),
            fps,
            target_frames,
        }
    }
}

impl FrameHost for CliHost {
    fn poll_cancelled(&mut self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn present(&mut self, _frame: &FrameBuffer, tick: u64) {
        let done = tick + 1;
        if done % self.fps.max(1) as u64 == 0 || done == self.target_frames {
            tracing::info!("Generated {}/{} frames", done, self.target_frames);
        }
    }

    fn pace(&mut self) {
        if let Some(pacer) = &mut self.pacer {
            pacer.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_interval() {
        assert_eq!(FramePacer::new(30).interval(), Duration::from_nanos(33_333_333));
        assert_eq!(FramePacer::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_pacer_caps_rate() {
        let mut pacer = FramePacer::new(100);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        // First call returns immediately, the next three wait ~10ms each.
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_host_reports_cancellation() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut host = CliHost::new(flag.clone(), 30, 90, false);
        assert!(!host.poll_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(host.poll_cancelled());
    }

    #[test]
    fn test_unpaced_host_does_not_sleep() {
        let mut host = CliHost::new(Arc::new(AtomicBool::new(false)), 1, 90, false);
        let start = Instant::now();
        for _ in 0..5 {
            host.pace();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}

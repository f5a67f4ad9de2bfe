pub const DEFAULT_BATCH_SECONDS: f32 = 0.5;
const LOG_INTERVAL_SECONDS: f32 = 5.0;

/// Frame rate averaged over short batches of frames.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    batch_seconds: f32,
    batch_frames: u32,
    batch_elapsed: f32,
    since_log: f32,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SECONDS)
    }
}

impl FpsCounter {
    pub fn new(batch_seconds: f32) -> Self {
        Self {
            batch_seconds: batch_seconds.max(f32::EPSILON),
            batch_frames: 0,
            batch_elapsed: 0.0,
            since_log: 0.0,
            fps: 0.0,
        }
    }

    /// Last completed batch average; 0 until the first batch closes.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn record(&mut self, delta_time: f32) {
        self.batch_frames = self.batch_frames.saturating_add(1);
        self.batch_elapsed += delta_time.max(0.0);
        if self.batch_elapsed < self.batch_seconds {
            return;
        }

        self.fps = self.batch_frames as f32 / self.batch_elapsed;
        self.since_log += self.batch_elapsed;
        if self.since_log >= LOG_INTERVAL_SECONDS {
            log::debug!(
                "fps: {:.2} | {} frames in {:.3}s",
                self.fps,
                self.batch_frames,
                self.batch_elapsed
            );
            self.since_log = 0.0;
        }
        self.batch_frames = 0;
        self.batch_elapsed = 0.0;
    }

    pub fn label(&self) -> String {
        format!("FPS: {:.2}", self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_a_batch() {
        let mut fps = FpsCounter::new(0.5);
        for _ in 0..14 {
            fps.record(1.0 / 30.0);
        }
        assert_eq!(fps.fps(), 0.0);
        fps.record(1.0 / 30.0);
        fps.record(1.0 / 30.0);
        assert!((fps.fps() - 30.0).abs() < 0.1);
        assert_eq!(fps.label(), "FPS: 30.00");
    }

    #[test]
    fn uneven_frames_average_out() {
        let mut fps = FpsCounter::new(1.0);
        for dt in [0.25, 0.5, 0.125, 0.125] {
            fps.record(dt);
        }
        assert!((fps.fps() - 4.0).abs() < 1e-4);
    }
}

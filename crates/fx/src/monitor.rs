//! Frame-rate sampling in fixed windows.

/// Accumulates frame times and reports the average FPS of each closed window.
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    window: f32,
    frames: u32,
    elapsed: f32,
    last_fps: Option<f32>,
}

impl FrameRateMonitor {
    /// Monitor with a `window`-second bucket (non-positive windows become one second).
    pub fn new(window: f32) -> Self {
        let window = if window > 0.0 { window } else { 1.0 };
        Self {
            window,
            frames: 0,
            elapsed: 0.0,
            last_fps: None,
        }
    }

    /// Record one frame of `dt` seconds. Returns the average FPS when a window closes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Average of the most recent closed window.
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }

    pub fn window(&self) -> f32 {
        self.window
    }
}

impl Default for FrameRateMonitor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

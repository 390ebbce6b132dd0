//=========================================================================
// Frame Timer
//
// Monotonic stopwatch used by the application loop to measure the
// timestep between frames.
//
//=========================================================================

use std::time::{Duration, Instant};

//=== FrameTimer ==========================================================

#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    start: Instant,
}

impl FrameTimer {
    /// Creates a timer that is already running.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// (Re)starts measuring from now.
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn reset(&mut self) {
        self.start();
    }

    /// Seconds since the last `start()` / `reset()`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_duration().as_secs_f32()
    }

    pub fn elapsed_duration(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the elapsed seconds and restarts the timer.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let timestep = now.duration_since(self.start).as_secs_f32();
        self.start = now;
        timestep
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//! Time management for the simulation loop.

use std::time::{Duration, Instant};

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the simulation started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

/// Fixed-rate scheduler for throttled subsystems.
///
/// Accumulates frame deltas and fires once the configured interval has been
/// reached, reporting the window of time consumed. Frame-rate independent:
/// a subsystem running on a `Cadence` does the same amount of work per
/// simulated second whether the host renders at 30 or 144 fps.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: f32,
    accumulated: f32,
}

impl Cadence {
    /// Create a cadence firing `hz` times per simulated second.
    pub fn from_hz(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulated: 0.0,
        }
    }

    /// Feed this frame's delta. Returns `Some(window)` when a tick is due,
    /// where `window` is the total time consumed since the previous tick.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.accumulated += dt;
        if self.accumulated >= self.interval {
            let window = self.accumulated;
            self.accumulated = 0.0;
            Some(window)
        } else {
            None
        }
    }

    /// The configured interval in seconds.
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_fires_once_interval_reached() {
        let mut cadence = Cadence::from_hz(10.0);
        assert_eq!(cadence.tick(0.05), None);
        // 0.05 + 0.06 = 0.11 >= 0.1: fires and reports the full window.
        let window = cadence.tick(0.06).expect("should fire");
        assert!((window - 0.11).abs() < 1e-6);
    }

    #[test]
    fn cadence_resets_after_firing() {
        let mut cadence = Cadence::from_hz(10.0);
        assert!(cadence.tick(0.2).is_some());
        assert_eq!(cadence.tick(0.05), None);
    }

    #[test]
    fn cadence_large_frame_fires_with_full_window() {
        // A single slow frame still yields one tick whose window covers the
        // whole frame, so impulse scaling stays correct.
        let mut cadence = Cadence::from_hz(20.0);
        let window = cadence.tick(0.5).expect("should fire");
        assert!((window - 0.5).abs() < 1e-6);
    }
}

//! Time facilities for the gallery.
//!
//! Two clocks live here:
//!
//! - [`AnimationClock`] is simulated time. It only moves when [`tick`] is
//!   called and advances by `delta × speed`, so `speed = 0` freezes it and
//!   wall-clock pauses never leak into the animation.
//! - [`FrameTimer`] measures wall-clock frame deltas and FPS for the viewer
//!   loop that feeds the animation clock.
//!
//! # Example
//!
//! ```ignore
//! use particle_forms::time::{AnimationClock, FrameTimer};
//!
//! let mut timer = FrameTimer::new();
//! let mut clock = AnimationClock::new();
//!
//! // In your render loop:
//! let delta = timer.update();
//! clock.tick(delta, params.speed);
//! engine::advance(kind, &mut buffer, &clock, &params, true);
//! ```
//!
//! [`tick`]: AnimationClock::tick

use std::time::{Duration, Instant};

/// Phase rate applied to simulated seconds by most deformation laws.
///
/// Shapes sweep their phases 1.2× faster than the raw clock.
pub const PHASE_RATE: f32 = 1.2;

/// Monotonic simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationClock {
    /// Accumulated simulated seconds.
    time: f32,
    /// Number of ticks applied.
    ticks: u64,
}

impl AnimationClock {
    /// A clock at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock already advanced to `time` simulated seconds.
    ///
    /// Negative or non-finite input starts at zero.
    pub fn at(time: f32) -> Self {
        Self {
            time: if time.is_finite() { time.max(0.0) } else { 0.0 },
            ticks: 0,
        }
    }

    /// Advance by `delta × speed` and return the new time.
    ///
    /// Negative or non-finite products are ignored so the clock never runs
    /// backwards.
    pub fn tick(&mut self, delta: f32, speed: f32) -> f32 {
        let step = delta * speed;
        if step.is_finite() && step > 0.0 {
            self.time += step;
        }
        self.ticks += 1;
        self.time
    }

    /// Simulated seconds since the clock started.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Simulated time scaled by [`PHASE_RATE`].
    #[inline]
    pub fn phase(&self) -> f32 {
        self.time * PHASE_RATE
    }

    /// Number of ticks applied, including frozen ones.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Reset to `t = 0`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Wall-clock frame timing for the render loop.
///
/// Reports delta time (clamped so a stalled window does not produce a huge
/// jump in simulated time) and a periodically refreshed FPS estimate.
#[derive(Debug)]
pub struct FrameTimer {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Upper bound on a single delta.
    max_delta: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            max_delta: 0.1,
        }
    }

    /// Measure the frame. Call once per frame; returns the clamped delta.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = raw_delta.min(self.max_delta);
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Set the largest delta a single frame may report.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = AnimationClock::new();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_clock_scales_by_speed() {
        let mut clock = AnimationClock::new();
        clock.tick(0.5, 2.0);
        clock.tick(0.25, 4.0);
        assert!((clock.time() - 2.0).abs() < 1e-6);
        assert_eq!(clock.ticks(), 2);
        assert!((clock.phase() - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_clock_freezes_at_zero_speed() {
        let mut clock = AnimationClock::at(3.0);
        for _ in 0..10 {
            clock.tick(1.0 / 60.0, 0.0);
        }
        assert_eq!(clock.time(), 3.0);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = AnimationClock::at(1.0);
        clock.tick(-1.0, 1.0);
        clock.tick(f32::NAN, 1.0);
        clock.tick(1.0, f32::INFINITY);
        assert_eq!(clock.time(), 1.0);
        assert_eq!(AnimationClock::at(-5.0).time(), 0.0);
    }

    #[test]
    fn test_frame_timer_update() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(10));
        let delta = timer.update();

        assert!(delta > 0.0);
        assert_eq!(timer.frame(), 1);
    }

    #[test]
    fn test_frame_timer_clamps_delta() {
        let mut timer = FrameTimer::new();
        timer.set_max_delta(0.005);
        thread::sleep(Duration::from_millis(20));
        assert!(timer.update() <= 0.005);
    }
}

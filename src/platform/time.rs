//! Frame timing

use std::time::{Duration, Instant};

use crate::consts::MAX_DELTA;

/// Timing for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped to the clock's ceiling
    pub dt: f32,
    /// Milliseconds since the clock started
    pub now_ms: u64,
}

/// Source of per-tick timing
pub trait Clock {
    fn tick(&mut self) -> FrameTime;
}

/// Wall clock. Long stalls (debugger, window drag) are clamped to
/// `max_delta` so a single step cannot tunnel through a platform.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            max_delta,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let raw = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        FrameTime {
            dt: raw.min(self.max_delta),
            now_ms: now.saturating_duration_since(self.start).as_millis() as u64,
        }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }
}

/// Deterministic clock advancing by a constant step every tick
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    elapsed: Duration,
    max_delta: f32,
}

impl FixedClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            elapsed: Duration::ZERO,
            max_delta: MAX_DELTA,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Convenience for a fixed tick rate, e.g. 60 Hz
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step;
        FrameTime {
            dt: self.step.as_secs_f32().min(self.max_delta),
            now_ms: self.elapsed.as_millis() as u64,
        }
    }
}

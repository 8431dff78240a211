//! Platform abstraction layer
//!
//! Everything the simulation needs from the host, reduced to plain values:
//! - Time: a clamped delta plus a monotonic millisecond timestamp
//! - Input: a boolean per logical action, polled once per tick
//! - Cancellation: a shared stop flag checked between ticks

pub mod input;
pub mod time;

pub use input::{Action, ActionSource, DemoInput, KeyState};
pub use time::{Clock, FixedClock, FrameClock, FrameTime};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation shared between the loop and whoever wants it to end.
/// A tick that has started always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

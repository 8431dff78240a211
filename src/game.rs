//! Frame runner
//!
//! Owns a world, a clock and the current viewport. Each frame samples the
//! action source once, reads one clamped delta from the clock and runs a
//! single simulation tick. The stop flag is only consulted between frames.

use crate::platform::{ActionSource, Clock, StopFlag};
use crate::scaling::Viewport;
use crate::sim::state::{GameEvent, World};
use crate::sim::tick::{Frame, TickInput, TickOutput, tick};

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub jumps: u64,
    pub landings: u64,
    pub resets: u64,
    pub scale_changes: u64,
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        self.frames += 1;
        for event in events {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::Landed { .. } => self.landings += 1,
                GameEvent::PlayerReset { .. } => self.resets += 1,
                GameEvent::ScaleModeChanged(_) => self.scale_changes += 1,
                _ => {}
            }
        }
    }
}

/// A running game instance
pub struct Game<C: Clock> {
    pub world: World,
    clock: C,
    viewport: Viewport,
    stop: StopFlag,
    stats: RunStats,
}

impl<C: Clock> Game<C> {
    pub fn new(world: World, clock: C, viewport: Viewport) -> Self {
        Self {
            world,
            clock,
            viewport,
            stop: StopFlag::new(),
            stats: RunStats::default(),
        }
    }

    /// Handle that ends `run` at the next frame boundary
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Window resized: new scaling input and a horizontal re-clamp
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        }
        self.viewport = viewport;
        self.world.reclamp();
    }

    /// Run exactly one tick
    pub fn frame(&mut self, source: &mut impl ActionSource) -> TickOutput {
        source.update();
        let input = TickInput::sample(&*source);
        let time = self.clock.tick();
        let frame = Frame {
            dt: time.dt,
            now_ms: time.now_ms,
            viewport: self.viewport,
        };
        let output = tick(&mut self.world, &input, &frame);
        self.stats.record(&output.events);
        output
    }

    /// Run frames until stopped or `max_frames` have elapsed.
    ///
    /// `on_frame` receives every tick's output (draw, log, pace to vsync).
    pub fn run(
        &mut self,
        source: &mut impl ActionSource,
        max_frames: Option<u64>,
        mut on_frame: impl FnMut(&TickOutput),
    ) -> RunStats {
        let start = self.stats.frames;
        while !self.stop.is_stopped() {
            if max_frames.is_some_and(|max| self.stats.frames - start >= max) {
                break;
            }
            let output = self.frame(source);
            on_frame(&output);
        }
        self.stats
    }
}

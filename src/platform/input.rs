//! Logical input actions
//!
//! The host maps its keys or buttons onto `Action`s; the simulation only ever
//! sees the resulting `TickInput` snapshot. Edge detection for toggles happens
//! inside the world, so sources report raw levels.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::tick::TickInput;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ToggleScaleMode,
    Pause,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ToggleScaleMode,
        Action::Pause,
    ];
}

/// Anything that can answer "is this action held right now"
pub trait ActionSource {
    fn is_action_pressed(&self, action: Action) -> bool;

    /// Called once per tick before sampling (poll devices, advance scripts)
    fn update(&mut self) {}
}

impl TickInput {
    /// Snapshot every action level from `source`
    pub fn sample(source: &impl ActionSource) -> Self {
        Self {
            move_left: source.is_action_pressed(Action::MoveLeft),
            move_right: source.is_action_pressed(Action::MoveRight),
            jump: source.is_action_pressed(Action::Jump),
            toggle_scale_mode: source.is_action_pressed(Action::ToggleScaleMode),
            pause: source.is_action_pressed(Action::Pause),
        }
    }
}

/// Set of currently held actions, fed by key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Action>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    /// Drop everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl ActionSource for KeyState {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Seeded random player for headless soak runs.
///
/// Holds a walking direction for a random number of ticks and taps jump now
/// and then. The same seed always produces the same input stream.
#[derive(Debug, Clone)]
pub struct DemoInput {
    rng: Pcg32,
    keys: KeyState,
    hold_ticks: u32,
    jump_chance: f64,
}

impl DemoInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            keys: KeyState::new(),
            hold_ticks: 0,
            jump_chance: 0.04,
        }
    }

    pub fn with_jump_chance(mut self, chance: f64) -> Self {
        self.jump_chance = chance.clamp(0.0, 1.0);
        self
    }
}

impl ActionSource for DemoInput {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.keys.is_action_pressed(action)
    }

    fn update(&mut self) {
        if self.hold_ticks == 0 {
            let direction = self.rng.random_range(0..3u8);
            self.keys.set(Action::MoveLeft, direction == 0);
            self.keys.set(Action::MoveRight, direction == 2);
            self.hold_ticks = self.rng.random_range(15..90);
        } else {
            self.hold_ticks -= 1;
        }
        let jump = self.rng.random_bool(self.jump_chance);
        self.keys.set(Action::Jump, jump);
    }
}

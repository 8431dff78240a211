//! Loopy - simulation core of a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, animation, world tick)
//! - `scaling`: Design-space to screen-space mapping
//! - `renderer`: Render list and GPU-ready sprite quads
//! - `platform`: Clocks, input sampling, stop flag
//! - `game`: Frame runner tying the platform layer to the simulation
//! - `settings` / `level`: Data-driven tuning and course layout

pub mod game;
pub mod level;
pub mod platform;
pub mod renderer;
pub mod scaling;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use level::Level;
pub use scaling::{ScaleMode, Scaler, Viewport};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Design resolution gameplay geometry is authored in
    pub const DESIGN_WIDTH: f32 = 1920.0;
    pub const DESIGN_HEIGHT: f32 = 1080.0;

    /// Largest delta fed to the integrator (seconds). Bounds per-tick
    /// displacement so thin platforms can't be skipped.
    pub const MAX_DELTA: f32 = 0.05;

    /// Downward acceleration in design units/s²
    pub const DEFAULT_GRAVITY: f32 = 1200.0;
    /// Horizontal run speed (units/s)
    pub const DEFAULT_MOVE_SPEED: f32 = 400.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const DEFAULT_JUMP_VELOCITY: f32 = -900.0;
    /// Slack allowed when deciding which face of a platform was crossed
    pub const DEFAULT_LANDING_TOLERANCE: f32 = 20.0;
    /// How far below the world the player may fall before respawning
    pub const DEFAULT_FALL_MARGIN: f32 = 200.0;

    /// Player sprite sheet defaults (8-frame horizontal strip)
    pub const PLAYER_FRAME_COUNT: u32 = 8;
    pub const PLAYER_FRAME_SIZE: u32 = 256;
    pub const PLAYER_FRAME_DELAY_MS: u64 = 100;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta time is clamped by the caller, never measured here
//! - No hidden globals: gravity, scale mode and tuning travel with the `World`
//! - Stable iteration order (static platforms, moving platforms, hazards)
//! - No rendering or platform dependencies beyond producing geometry

pub mod animation;
pub mod collision;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use animation::{AnimationState, Sprite, TextureHandle};
pub use collision::{Contact, Side, fell_out, first_hazard, resolve_solid, ride};
pub use physics::{Body, Physics};
pub use rect::{Rect, intersects};
pub use state::{
    EdgeDetector, GameEvent, Hazard, Oscillator, Platform, PlatformKind, Player, ResetCause,
    World, WorldBounds,
};
pub use tick::{Frame, TickInput, TickOutput, tick};

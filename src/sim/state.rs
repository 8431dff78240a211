//! World state and entity types
//!
//! Entities are plain compositions of capabilities: every one has a `Rect`,
//! movers add a `Body`, visible ones add a `Sprite`. Nothing is removed at
//! runtime; respawning mutates the player in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Sprite;
use super::collision::Side;
use super::physics::{Body, Physics};
use super::rect::Rect;
use crate::scaling::{ScaleMode, Scaler};
use crate::settings::{Settings, Tuning};

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub body: Body,
    pub sprite: Sprite,
    /// Set only by a landing resolution this tick
    pub grounded: bool,
    /// Previous tick's `grounded`; gates jumping
    pub was_grounded: bool,
    /// Platform index the player is standing on
    pub ground: Option<usize>,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            rect: Rect::new(position.x, position.y, size.x, size.y),
            body: Body::new(Vec2::ZERO, true),
            sprite,
            grounded: false,
            was_grounded: false,
            ground: None,
        }
    }

    /// Put the player back at `spawn` with no velocity
    pub fn respawn(&mut self, spawn: Vec2) {
        self.rect.set_position(spawn);
        self.body.stop();
        self.grounded = false;
        self.ground = None;
    }
}

/// Horizontal back-and-forth motion between two bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Units per second (always positive)
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub left_bound: f32,
    pub right_bound: f32,
}

impl Oscillator {
    pub fn new(speed: f32, left_bound: f32, right_bound: f32) -> Self {
        Self {
            speed: speed.abs(),
            direction: 1.0,
            left_bound: left_bound.min(right_bound),
            right_bound: left_bound.max(right_bound),
        }
    }

    /// Signed horizontal velocity
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction
    }

    /// Move `rect` for one tick. On reaching a bound the platform snaps to it
    /// and reverses; returns true when that happened.
    pub fn advance(&mut self, rect: &mut Rect, dt: f32) -> bool {
        rect.x += self.velocity() * dt;
        if self.direction > 0.0 && rect.x >= self.right_bound {
            rect.x = self.right_bound;
            self.direction = -1.0;
            return true;
        }
        if self.direction < 0.0 && rect.x <= self.left_bound {
            rect.x = self.left_bound;
            self.direction = 1.0;
            return true;
        }
        false
    }
}

/// Platform behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    Oscillating(Oscillator),
}

/// A solid surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    pub sprite: Option<Sprite>,
}

impl Platform {
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            kind: PlatformKind::Static,
            sprite: Some(placeholder_for(&rect)),
        }
    }

    pub fn oscillating(rect: Rect, oscillator: Oscillator) -> Self {
        Self {
            rect,
            kind: PlatformKind::Oscillating(oscillator),
            sprite: Some(placeholder_for(&rect)),
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Collides but is never drawn
    pub fn invisible(mut self) -> Self {
        self.sprite = None;
        self
    }

    pub fn oscillator(&self) -> Option<&Oscillator> {
        match &self.kind {
            PlatformKind::Oscillating(osc) => Some(osc),
            PlatformKind::Static => None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.oscillator().is_some()
    }
}

/// A zone that respawns the player on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    pub sprite: Option<Sprite>,
}

impl Hazard {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            sprite: Some(placeholder_for(&rect)),
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn invisible(mut self) -> Self {
        self.sprite = None;
        self
    }
}

/// Untextured sprite the size of `rect`
fn placeholder_for(rect: &Rect) -> Sprite {
    Sprite::placeholder(rect.w.max(0.0) as u32, rect.h.max(0.0) as u32)
}

/// Rising-edge detector for toggles and debounced contacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    /// Feed this tick's level; true only on a false -> true transition
    pub fn rising(&mut self, level: bool) -> bool {
        let edge = level && !self.previous;
        self.previous = level;
        edge
    }

    pub fn is_high(&self) -> bool {
        self.previous
    }
}

/// Why the player was put back at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Hazard(usize),
    OutOfBounds,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Player touched down after being airborne
    Landed { platform: usize },
    Blocked { platform: usize, side: Side },
    Bumped { platform: usize },
    /// Emitted once per continuous hazard/out-of-bounds contact
    PlayerReset { cause: ResetCause },
    ScaleModeChanged(ScaleMode),
    PauseChanged(bool),
    PlatformReversed { platform: usize },
}

/// Horizontal and vertical extent of the playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    /// Lower bound; falling past it (plus margin) respawns the player
    pub height: f32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    /// Static platforms are resolved before moving ones regardless of order
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub spawn: Vec2,
    pub bounds: WorldBounds,
    pub physics: Physics,
    pub tuning: Tuning,
    pub scaler: Scaler,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) hazard_contact: EdgeDetector,
    pub(crate) scale_toggle: EdgeDetector,
    pub(crate) pause_toggle: EdgeDetector,
}

impl World {
    /// Create a world with no platforms. The player's current position
    /// becomes the spawn point and the bounds default to the design size.
    pub fn new(settings: &Settings, player: Player) -> Self {
        Self {
            spawn: player.rect.position(),
            player,
            platforms: Vec::new(),
            hazards: Vec::new(),
            bounds: WorldBounds {
                width: settings.display.design_width,
                height: settings.display.design_height,
            },
            physics: settings.physics,
            tuning: settings.tuning.clone(),
            scaler: settings.display.scaler(),
            paused: false,
            time_ticks: 0,
            hazard_contact: EdgeDetector::default(),
            scale_toggle: EdgeDetector::default(),
            pause_toggle: EdgeDetector::default(),
        }
    }

    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.bounds = WorldBounds { width, height };
        self
    }

    pub fn add_platform(&mut self, platform: Platform) -> usize {
        self.platforms.push(platform);
        self.platforms.len() - 1
    }

    pub fn add_hazard(&mut self, hazard: Hazard) -> usize {
        self.hazards.push(hazard);
        self.hazards.len() - 1
    }

    /// Keep the player inside the horizontal bounds. Vertical position is
    /// never clamped; falling out is handled as a respawn.
    pub fn clamp_player(&mut self) {
        let max_x = (self.bounds.width - self.player.rect.w).max(0.0);
        self.player.rect.x = self.player.rect.x.clamp(0.0, max_x);
    }

    /// Re-apply the clamp after a window resize
    pub fn reclamp(&mut self) {
        self.clamp_player();
    }

    /// True while the player is still overlapping a hazard from a previous tick
    pub fn touching_hazard(&self) -> bool {
        self.hazard_contact.is_high()
    }

    /// Platform indices in resolution order: static first, then moving
    pub fn resolution_order(&self) -> Vec<usize> {
        let statics = self.platforms.iter().enumerate().filter(|(_, p)| !p.is_moving());
        let moving = self.platforms.iter().enumerate().filter(|(_, p)| p.is_moving());
        statics.chain(moving).map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), Vec2::new(64.0, 128.0), Sprite::placeholder(64, 128))
    }

    #[test]
    fn test_edge_detector() {
        let mut edge = EdgeDetector::default();
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
        assert!(!edge.rising(true));
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn test_oscillator_reverses_at_bounds() {
        let mut osc = Oscillator::new(100.0, 0.0, 50.0);
        let mut rect = Rect::new(40.0, 0.0, 10.0, 10.0);

        assert!(!osc.advance(&mut rect, 0.05)); // 45
        assert!(osc.advance(&mut rect, 0.05)); // would be 50 -> snap + flip
        assert_eq!(rect.x, 50.0);
        assert_eq!(osc.direction, -1.0);

        // Overshoot past the left bound snaps exactly
        rect.x = 3.0;
        assert!(osc.advance(&mut rect, 0.05));
        assert_eq!(rect.x, 0.0);
        assert_eq!(osc.direction, 1.0);
    }

    #[test]
    fn test_oscillator_normalizes_bounds() {
        let osc = Oscillator::new(-80.0, 300.0, 100.0);
        assert_eq!(osc.speed, 80.0);
        assert_eq!(osc.left_bound, 100.0);
        assert_eq!(osc.right_bound, 300.0);
        assert_eq!(osc.velocity(), 80.0);
    }

    #[test]
    fn test_respawn_resets_in_place() {
        let mut player = player_at(10.0, 20.0);
        player.rect.set_position(Vec2::new(500.0, 900.0));
        player.body.vel = Vec2::new(100.0, 300.0);
        player.grounded = true;
        player.ground = Some(2);

        player.respawn(Vec2::new(10.0, 20.0));
        assert_eq!(player.rect.position(), Vec2::new(10.0, 20.0));
        assert_eq!(player.body.vel, Vec2::ZERO);
        assert!(!player.grounded);
        assert_eq!(player.ground, None);
    }

    #[test]
    fn test_clamp_is_horizontal_only() {
        let mut world = World::new(&Settings::default(), player_at(0.0, 0.0)).with_bounds(1000.0, 500.0);
        world.player.rect.x = 990.0;
        world.player.rect.y = 5000.0;
        world.clamp_player();
        assert_eq!(world.player.rect.x, 936.0);
        assert_eq!(world.player.rect.y, 5000.0);

        world.player.rect.x = -20.0;
        world.reclamp();
        assert_eq!(world.player.rect.x, 0.0);
    }

    #[test]
    fn test_resolution_order_puts_moving_last() {
        let mut world = World::new(&Settings::default(), player_at(0.0, 0.0));
        world.add_platform(Platform::oscillating(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Oscillator::new(10.0, 0.0, 100.0),
        ));
        world.add_platform(Platform::fixed(Rect::new(0.0, 0.0, 10.0, 10.0)));
        world.add_platform(Platform::fixed(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(world.resolution_order(), vec![1, 2, 0]);
    }

    #[test]
    fn test_spawn_taken_from_player() {
        let world = World::new(&Settings::default(), player_at(12.0, 34.0));
        assert_eq!(world.spawn, Vec2::new(12.0, 34.0));
        assert!(!world.touching_hazard());
    }
}

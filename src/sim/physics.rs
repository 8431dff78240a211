//! Semi-implicit Euler integration for movable bodies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_GRAVITY;

/// Velocity state of a movable entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    /// Velocity in design units per second (positive y is down)
    pub vel: Vec2,
    pub gravity_affected: bool,
}

impl Body {
    pub fn new(vel: Vec2, gravity_affected: bool) -> Self {
        Self {
            vel,
            gravity_affected,
        }
    }

    /// Zero both velocity components (respawn)
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }
}

/// Integrator parameters. Passed by value into each step so independent
/// worlds never share a gravity setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl Physics {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// Advance `pos` and `body` by `dt` seconds.
    ///
    /// Velocity is updated before position so gravity contributes to this
    /// step's displacement. `dt` must already be clamped by the caller.
    pub fn step(&self, dt: f32, body: &mut Body, pos: &mut Vec2) {
        if body.gravity_affected {
            body.vel.y += self.gravity * dt;
        }
        pos.x += body.vel.x * dt;
        pos.y += body.vel.y * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_applied_before_position() {
        let physics = Physics::new(1000.0);
        let mut body = Body::new(Vec2::ZERO, true);
        let mut pos = Vec2::ZERO;
        physics.step(0.1, &mut body, &mut pos);
        assert_eq!(body.vel.y, 100.0);
        // Semi-implicit: displacement already sees the new velocity
        assert_eq!(pos.y, 10.0);
    }

    #[test]
    fn test_unaffected_body_keeps_velocity() {
        let physics = Physics::new(1000.0);
        let mut body = Body::new(Vec2::new(50.0, -20.0), false);
        let mut pos = Vec2::new(1.0, 2.0);
        physics.step(0.5, &mut body, &mut pos);
        assert_eq!(body.vel, Vec2::new(50.0, -20.0));
        assert_eq!(pos, Vec2::new(26.0, -8.0));
    }

    #[test]
    fn test_gravity_change_takes_effect_next_step() {
        let mut physics = Physics::new(100.0);
        let mut body = Body::new(Vec2::ZERO, true);
        let mut pos = Vec2::ZERO;
        physics.step(1.0, &mut body, &mut pos);
        assert_eq!(body.vel.y, 100.0);

        physics.gravity = 0.0;
        physics.step(1.0, &mut body, &mut pos);
        assert_eq!(body.vel.y, 100.0);
    }

    proptest! {
        #[test]
        fn prop_linear_without_gravity(
            v in 0.0f32..10_000.0,
            dt in 0.0f32..0.05,
            x in -5_000.0f32..5_000.0,
        ) {
            let physics = Physics::new(2000.0);
            let mut body = Body::new(Vec2::new(v, 0.0), false);
            let mut pos = Vec2::new(x, 0.0);
            physics.step(dt, &mut body, &mut pos);
            prop_assert_eq!(pos.x, x + v * dt);
            prop_assert_eq!(pos.y, 0.0);
        }

        #[test]
        fn prop_airborne_velocity_non_decreasing(
            g in 0.1f32..5_000.0,
            dts in proptest::collection::vec(0.0f32..0.05, 1..64),
        ) {
            let physics = Physics::new(g);
            let mut body = Body::new(Vec2::ZERO, true);
            let mut pos = Vec2::ZERO;
            let mut last = body.vel.y;
            for dt in dts {
                physics.step(dt, &mut body, &mut pos);
                prop_assert!(body.vel.y >= last);
                last = body.vel.y;
            }
        }
    }
}

//! Collision detection and response for axis-aligned rectangles
//!
//! A single overlap says nothing about which face was crossed, so every
//! resolution looks at where the player was before this tick's integration
//! step to decide between landing, side blocking and ceiling bumps.

use serde::{Deserialize, Serialize};

use super::physics::Body;
use super::rect::{Rect, intersects};

/// Horizontal face of a surface the player was stopped against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Player moving left, stopped by the surface's right face
    Left,
    /// Player moving right, stopped by the surface's left face
    Right,
}

/// Outcome of resolving the player against one solid surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No overlap this tick
    Clear,
    /// Player snapped on top of the surface
    Landed,
    /// Player pushed back out of a side face
    Blocked(Side),
    /// Player hit the underside while rising
    Bumped,
    /// Overlapping, but no face could be inferred from the previous position
    Unresolved,
}

impl Contact {
    pub fn is_landing(&self) -> bool {
        matches!(self, Contact::Landed)
    }
}

/// Resolve the player against a solid surface.
///
/// `previous` is the player's rectangle before this tick's integration step.
/// Landing is tried first, then side blocking, then the ceiling.
pub fn resolve_solid(
    player: &mut Rect,
    body: &mut Body,
    previous: &Rect,
    surface: &Rect,
    tolerance: f32,
) -> Contact {
    if !intersects(player, surface) {
        return Contact::Clear;
    }

    // Landing: falling (or resting) and the feet were above the top last tick
    if body.vel.y >= 0.0 && previous.bottom() <= surface.top() + tolerance {
        player.y = surface.top() - player.h;
        body.vel.y = 0.0;
        return Contact::Landed;
    }

    if body.vel.x < 0.0 && previous.left() >= surface.right() - tolerance {
        player.x = surface.right();
        body.vel.x = 0.0;
        return Contact::Blocked(Side::Left);
    }
    if body.vel.x > 0.0 && previous.right() <= surface.left() + tolerance {
        player.x = surface.left() - player.w;
        body.vel.x = 0.0;
        return Contact::Blocked(Side::Right);
    }

    if body.vel.y < 0.0 && previous.top() >= surface.bottom() - tolerance {
        player.y = surface.bottom();
        body.vel.y = 0.0;
        return Contact::Bumped;
    }

    Contact::Unresolved
}

/// Carry a grounded player along with a moving surface for one tick
#[inline]
pub fn ride(player: &mut Rect, surface_velocity_x: f32, dt: f32) {
    player.x += surface_velocity_x * dt;
}

/// Index of the first hazard zone the player overlaps
pub fn first_hazard<'a>(player: &Rect, zones: impl IntoIterator<Item = &'a Rect>) -> Option<usize> {
    zones.into_iter().position(|zone| intersects(player, zone))
}

/// True once the player's top has dropped `margin` units past the world's
/// lower bound, i.e. it fell through everything
#[inline]
pub fn fell_out(player: &Rect, lower_bound: f32, margin: f32) -> bool {
    player.y > lower_bound + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const TOL: f32 = 20.0;

    fn ground() -> Rect {
        Rect::new(0.0, 500.0, 400.0, 40.0)
    }

    #[test]
    fn test_landing_snaps_exactly() {
        let previous = Rect::new(100.0, 240.0, 64.0, 256.0); // bottom 496
        let mut player = Rect::new(100.0, 250.0, 64.0, 256.0); // bottom 506
        let mut body = Body::new(Vec2::new(0.0, 600.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &ground(), TOL);
        assert_eq!(contact, Contact::Landed);
        assert_eq!(player.y, 244.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_landing_tolerates_one_frame_of_sink() {
        // Feet were slightly inside the top last tick (within tolerance)
        let previous = Rect::new(100.0, 254.0, 64.0, 256.0); // bottom 510
        let mut player = Rect::new(100.0, 260.0, 64.0, 256.0);
        let mut body = Body::new(Vec2::new(0.0, 300.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &ground(), TOL);
        assert!(contact.is_landing());
        assert_eq!(player.bottom(), 500.0);
    }

    #[test]
    fn test_no_overlap_is_clear() {
        let previous = Rect::new(100.0, 100.0, 64.0, 64.0);
        let mut player = previous;
        let mut body = Body::new(Vec2::new(0.0, 100.0), true);
        let contact = resolve_solid(&mut player, &mut body, &previous, &ground(), TOL);
        assert_eq!(contact, Contact::Clear);
        assert_eq!(body.vel.y, 100.0);
    }

    #[test]
    fn test_standing_on_edge_is_clear() {
        // Bottom exactly on the top: touching, not intersecting
        let previous = Rect::new(100.0, 436.0, 64.0, 64.0);
        let mut player = previous;
        let mut body = Body::new(Vec2::ZERO, true);
        let contact = resolve_solid(&mut player, &mut body, &previous, &ground(), TOL);
        assert_eq!(contact, Contact::Clear);
    }

    #[test]
    fn test_blocked_moving_left() {
        let wall = Rect::new(0.0, 0.0, 100.0, 1000.0);
        let previous = Rect::new(102.0, 300.0, 50.0, 50.0);
        let mut player = Rect::new(95.0, 305.0, 50.0, 50.0);
        let mut body = Body::new(Vec2::new(-400.0, 200.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &wall, TOL);
        assert_eq!(contact, Contact::Blocked(Side::Left));
        assert_eq!(player.x, 100.0);
        assert_eq!(body.vel.x, 0.0);
        // Vertical motion untouched
        assert_eq!(body.vel.y, 200.0);
        assert_eq!(player.y, 305.0);
    }

    #[test]
    fn test_blocked_moving_right() {
        let wall = Rect::new(500.0, 0.0, 100.0, 1000.0);
        let previous = Rect::new(448.0, 300.0, 50.0, 50.0);
        let mut player = Rect::new(455.0, 300.0, 50.0, 50.0);
        let mut body = Body::new(Vec2::new(400.0, 0.0), false);

        let contact = resolve_solid(&mut player, &mut body, &previous, &wall, TOL);
        assert_eq!(contact, Contact::Blocked(Side::Right));
        assert_eq!(player.x, 450.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_landing_wins_over_blocking() {
        // Falling diagonally onto a corner: the top face takes priority
        let previous = Rect::new(350.0, 430.0, 64.0, 64.0); // bottom 494
        let mut player = Rect::new(345.0, 440.0, 64.0, 64.0);
        let mut body = Body::new(Vec2::new(-300.0, 600.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &ground(), TOL);
        assert_eq!(contact, Contact::Landed);
        assert_eq!(body.vel.x, -300.0);
    }

    #[test]
    fn test_bump_ceiling_while_rising() {
        let ceiling = Rect::new(0.0, 0.0, 400.0, 100.0);
        let previous = Rect::new(50.0, 104.0, 64.0, 64.0);
        let mut player = Rect::new(50.0, 95.0, 64.0, 64.0);
        let mut body = Body::new(Vec2::new(0.0, -500.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &ceiling, TOL);
        assert_eq!(contact, Contact::Bumped);
        assert_eq!(player.y, 100.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_deep_overlap_unresolved() {
        // Player was already deep inside the block: no face can be inferred
        let block = Rect::new(0.0, 0.0, 400.0, 400.0);
        let previous = Rect::new(100.0, 100.0, 64.0, 64.0);
        let mut player = Rect::new(100.0, 90.0, 64.0, 64.0);
        let mut body = Body::new(Vec2::new(0.0, -100.0), true);

        let contact = resolve_solid(&mut player, &mut body, &previous, &block, TOL);
        assert_eq!(contact, Contact::Unresolved);
        assert_eq!(player, Rect::new(100.0, 90.0, 64.0, 64.0));
    }

    #[test]
    fn test_ride() {
        let mut player = Rect::new(100.0, 0.0, 10.0, 10.0);
        ride(&mut player, -150.0, 0.02);
        assert!((player.x - 97.0).abs() < 1e-4);
    }

    #[test]
    fn test_first_hazard() {
        let zones = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 100.0, 10.0, 10.0),
        ];
        let player = Rect::new(105.0, 105.0, 10.0, 10.0);
        assert_eq!(first_hazard(&player, &zones), Some(1));
        assert_eq!(first_hazard(&Rect::new(50.0, 50.0, 1.0, 1.0), &zones), None);
    }

    #[test]
    fn test_fell_out() {
        let player = Rect::new(0.0, 1250.0, 10.0, 10.0);
        assert!(fell_out(&player, 1080.0, 100.0));
        assert!(!fell_out(&player, 1080.0, 200.0));
    }
}

//! Rendering boundary
//!
//! The simulation never draws. It hands out an ordered list of screen-space
//! rectangles with their sprite frame and texture; `quads` turns that list
//! into vertices a wgpu pipeline can consume.

pub mod quads;
pub mod vertex;

pub use quads::{build_quads, sprite_quad};
pub use vertex::Vertex;

use crate::scaling::Viewport;
use crate::sim::animation::{Sprite, TextureHandle};
use crate::sim::rect::Rect;
use crate::sim::state::World;

/// One drawable entity for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    /// Destination rectangle in screen pixels
    pub screen_rect: Rect,
    /// Frame rectangle within the texture
    pub source_rect: Rect,
    pub texture: TextureHandle,
}

impl RenderItem {
    fn new(world: &World, rect: &Rect, sprite: &Sprite, viewport: Viewport) -> Self {
        Self {
            screen_rect: world.scaler.compute(rect, viewport),
            source_rect: sprite.animation.source_rect(),
            texture: sprite.texture,
        }
    }
}

/// Build the render list for the current world state.
///
/// Draw order is back to front: platforms, hazards, then the player.
/// Entities without a sprite are skipped.
pub fn render_list(world: &World, viewport: Viewport) -> Vec<RenderItem> {
    let platforms = world
        .platforms
        .iter()
        .filter_map(|p| p.sprite.as_ref().map(|s| (&p.rect, s)));
    let hazards = world
        .hazards
        .iter()
        .filter_map(|h| h.sprite.as_ref().map(|s| (&h.rect, s)));
    let player = std::iter::once((&world.player.rect, &world.player.sprite));

    platforms
        .chain(hazards)
        .chain(player)
        .map(|(rect, sprite)| RenderItem::new(world, rect, sprite, viewport))
        .collect()
}

//! Quad generation for the render list
//!
//! Each `RenderItem` becomes two triangles in normalized device coordinates
//! (y up), ready to upload with `bytemuck::cast_slice`.

use super::RenderItem;
use super::vertex::Vertex;
use crate::scaling::Viewport;
use crate::sim::animation::TextureHandle;

/// Two triangles covering `item.screen_rect`.
///
/// `texture_size` converts the source rect into UVs; a placeholder texture or
/// an unknown size samples the whole texture. Returns `None` for an empty
/// viewport.
pub fn sprite_quad(
    item: &RenderItem,
    viewport: Viewport,
    texture_size: Option<(u32, u32)>,
) -> Option<[Vertex; 6]> {
    if viewport.is_empty() {
        return None;
    }
    let (vw, vh) = (viewport.width as f32, viewport.height as f32);
    let rect = &item.screen_rect;

    let x0 = rect.left() / vw * 2.0 - 1.0;
    let x1 = rect.right() / vw * 2.0 - 1.0;
    let y0 = 1.0 - rect.top() / vh * 2.0;
    let y1 = 1.0 - rect.bottom() / vh * 2.0;

    let (u0, v0, u1, v1) = match texture_size {
        Some((tw, th)) if !item.texture.is_placeholder() && tw > 0 && th > 0 => {
            let src = &item.source_rect;
            let (tw, th) = (tw as f32, th as f32);
            (src.left() / tw, src.top() / th, src.right() / tw, src.bottom() / th)
        }
        _ => (0.0, 0.0, 1.0, 1.0),
    };

    Some([
        Vertex::new(x0, y0, u0, v0),
        Vertex::new(x0, y1, u0, v1),
        Vertex::new(x1, y0, u1, v0),
        Vertex::new(x1, y0, u1, v0),
        Vertex::new(x0, y1, u0, v1),
        Vertex::new(x1, y1, u1, v1),
    ])
}

/// Vertices for a whole render list, preserving draw order
pub fn build_quads(
    items: &[RenderItem],
    viewport: Viewport,
    size_of: impl Fn(TextureHandle) -> Option<(u32, u32)>,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(items.len() * 6);
    for item in items {
        if let Some(quad) = sprite_quad(item, viewport, size_of(item.texture)) {
            vertices.extend_from_slice(&quad);
        }
    }
    vertices
}

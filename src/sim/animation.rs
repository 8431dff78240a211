//! Sprite-sheet animation timing
//!
//! Sheets are a single horizontal strip of equally sized frames. Frame
//! advance uses single-step semantics: a long stall advances one frame, not
//! one frame per elapsed delay.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Opaque texture reference owned by the rendering layer.
///
/// The simulation never dereferences it; `PLACEHOLDER` stands in when the
/// asset failed to load or no renderer is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub Option<u32>);

impl TextureHandle {
    pub const PLACEHOLDER: TextureHandle = TextureHandle(None);

    pub fn new(id: u32) -> Self {
        Self(Some(id))
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.is_none()
    }
}

/// Frame selection state for an animated entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    frame_count: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    current_frame: u32,
    pub frame_delay_ms: u64,
    last_advance_ms: u64,
}

impl AnimationState {
    /// Create an animation starting at frame 0. A `frame_count` of zero is
    /// treated as one (idle sprite).
    pub fn new(frame_count: u32, frame_width: u32, frame_height: u32, frame_delay_ms: u64) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_width,
            frame_height,
            current_frame: 0,
            frame_delay_ms,
            last_advance_ms: 0,
        }
    }

    /// Single-frame sprite that never advances
    pub fn still(frame_width: u32, frame_height: u32) -> Self {
        Self::new(1, frame_width, frame_height, 0)
    }

    /// Restart the delay window at `now_ms` (spawn time)
    pub fn started_at(mut self, now_ms: u64) -> Self {
        self.last_advance_ms = now_ms;
        self
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn last_advance_ms(&self) -> u64 {
        self.last_advance_ms
    }

    /// Advance at most one frame if the delay has elapsed.
    ///
    /// Returns true when the frame changed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.frame_count <= 1 {
            return false;
        }
        if now_ms.saturating_sub(self.last_advance_ms) >= self.frame_delay_ms {
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            self.last_advance_ms = now_ms;
            return true;
        }
        false
    }

    /// Region of the sprite sheet holding the current frame
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            (self.current_frame * self.frame_width) as f32,
            0.0,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }
}

/// Render capability: a texture plus its frame selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub animation: AnimationState,
}

impl Sprite {
    pub fn new(texture: TextureHandle, animation: AnimationState) -> Self {
        Self { texture, animation }
    }

    /// Static placeholder sprite covering a `w` x `h` texture
    pub fn placeholder(w: u32, h: u32) -> Self {
        Self::new(TextureHandle::PLACEHOLDER, AnimationState::still(w, h))
    }
}

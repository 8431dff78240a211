//! Design-space to screen-space mapping
//!
//! Gameplay geometry is authored against a fixed design resolution. The
//! scaler either passes it through untouched (`Pixel`) or stretches it to the
//! current viewport (`Proportional`).

use serde::{Deserialize, Serialize};

use crate::consts::{DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::sim::Rect;

/// How design coordinates map onto the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Design units are literal screen pixels
    #[default]
    Pixel,
    /// Scale by viewport / design resolution on each axis
    Proportional,
}

impl ScaleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleMode::Pixel => "Pixel",
            ScaleMode::Proportional => "Proportional",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ScaleMode::Pixel => ScaleMode::Proportional,
            ScaleMode::Proportional => ScaleMode::Pixel,
        }
    }
}

/// Current drawable size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-sized viewports (minimized windows) produce degenerate output
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Scaling context: current mode plus the design resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    mode: ScaleMode,
    pub design_width: f32,
    pub design_height: f32,
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new(ScaleMode::Pixel, DESIGN_WIDTH, DESIGN_HEIGHT)
    }
}

impl Scaler {
    pub fn new(mode: ScaleMode, design_width: f32, design_height: f32) -> Self {
        Self {
            mode,
            design_width,
            design_height,
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Takes effect on the next `compute` call
    pub fn set_mode(&mut self, mode: ScaleMode) {
        self.mode = mode;
    }

    /// Flip the mode and return the new one
    pub fn toggle(&mut self) -> ScaleMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Per-axis factors for the given viewport under the current mode
    pub fn factors(&self, viewport: Viewport) -> (f32, f32) {
        match self.mode {
            ScaleMode::Pixel => (1.0, 1.0),
            ScaleMode::Proportional => (
                viewport.width as f32 / self.design_width,
                viewport.height as f32 / self.design_height,
            ),
        }
    }

    /// Map a design-space rectangle to screen space
    pub fn compute(&self, logical: &Rect, viewport: Viewport) -> Rect {
        if self.mode == ScaleMode::Pixel {
            return *logical;
        }
        let (sx, sy) = self.factors(viewport);
        Rect::new(logical.x * sx, logical.y * sy, logical.w * sx, logical.h * sy)
    }
}

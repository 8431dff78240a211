//! Course layout
//!
//! A `Level` is plain data: where the player spawns, what its sprite sheet
//! looks like, and the platforms and hazards of the course. It can come from
//! a JSON file or the built-in demo course, and turns into a fresh `World`.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{ConfigError, Settings};
use crate::sim::animation::{AnimationState, Sprite, TextureHandle};
use crate::sim::rect::Rect;
use crate::sim::state::{Hazard, Oscillator, Platform, Player, World};

/// Horizontal strip sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetDef {
    /// Host texture id; `None` draws a placeholder
    pub texture: Option<u32>,
    pub frame_count: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_delay_ms: u64,
}

impl Default for SheetDef {
    fn default() -> Self {
        Self {
            texture: None,
            frame_count: PLAYER_FRAME_COUNT,
            frame_width: PLAYER_FRAME_SIZE,
            frame_height: PLAYER_FRAME_SIZE,
            frame_delay_ms: PLAYER_FRAME_DELAY_MS,
        }
    }
}

impl SheetDef {
    pub fn sprite(&self) -> Sprite {
        Sprite::new(
            TextureHandle(self.texture),
            AnimationState::new(
                self.frame_count,
                self.frame_width,
                self.frame_height,
                self.frame_delay_ms,
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub spawn: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub sheet: SheetDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationDef {
    pub speed: f32,
    pub left_bound: f32,
    pub right_bound: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillation: Option<OscillationDef>,
    #[serde(default = "visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDef {
    pub rect: Rect,
    #[serde(default = "visible")]
    pub visible: bool,
}

fn visible() -> bool {
    true
}

fn design_width() -> f32 {
    DESIGN_WIDTH
}

fn design_height() -> f32 {
    DESIGN_HEIGHT
}

/// A complete course description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub player: PlayerDef,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    #[serde(default = "design_width")]
    pub world_width: f32,
    /// Lower bound for the out-of-bounds respawn
    #[serde(default = "design_height")]
    pub world_height: f32,
}

impl Level {
    /// Built-in course: a floor with a pit, a few ledges, one moving
    /// platform over the pit and a spike strip.
    pub fn demo() -> Self {
        let fixed = |x, y, w, h| PlatformDef {
            rect: Rect::new(x, y, w, h),
            oscillation: None,
            visible: true,
        };
        Self {
            name: "demo".into(),
            player: PlayerDef {
                spawn: Vec2::new(100.0, 500.0),
                size: Vec2::new(128.0, 256.0),
                sheet: SheetDef::default(),
            },
            platforms: vec![
                fixed(0.0, 900.0, 700.0, 180.0),
                fixed(1200.0, 900.0, 720.0, 180.0),
                fixed(350.0, 650.0, 250.0, 30.0),
                fixed(1400.0, 600.0, 300.0, 30.0),
                PlatformDef {
                    rect: Rect::new(720.0, 800.0, 240.0, 30.0),
                    oscillation: Some(OscillationDef {
                        speed: 150.0,
                        left_bound: 700.0,
                        right_bound: 960.0,
                    }),
                    visible: true,
                },
            ],
            hazards: vec![HazardDef {
                rect: Rect::new(1500.0, 880.0, 150.0, 20.0),
                visible: true,
            }],
            world_width: DESIGN_WIDTH,
            world_height: DESIGN_HEIGHT,
        }
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let level: Level = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let level = Self::from_json(&json, &path.display().to_string())?;
        log::info!(
            "Loaded level '{}' ({} platforms, {} hazards)",
            level.name,
            level.platforms.len(),
            level.hazards.len()
        );
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "level '{}': world size must be positive",
                self.name
            )));
        }
        if !(self.player.size.x > 0.0 && self.player.size.y > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "level '{}': player size must be positive",
                self.name
            )));
        }
        let mut rects = self
            .platforms
            .iter()
            .map(|p| &p.rect)
            .chain(self.hazards.iter().map(|h| &h.rect));
        if let Some(bad) = rects.find(|r| r.w <= 0.0 || r.h <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "level '{}': zero-sized rect {bad:?}",
                self.name
            )));
        }
        Ok(())
    }

    /// Instantiate a fresh world for this course
    pub fn build_world(&self, settings: &Settings) -> World {
        let player = Player::new(self.player.spawn, self.player.size, self.player.sheet.sprite());
        let mut world =
            World::new(settings, player).with_bounds(self.world_width, self.world_height);

        for def in &self.platforms {
            let platform = match def.oscillation {
                Some(osc) => Platform::oscillating(
                    def.rect,
                    Oscillator::new(osc.speed, osc.left_bound, osc.right_bound),
                ),
                None => Platform::fixed(def.rect),
            };
            world.add_platform(if def.visible { platform } else { platform.invisible() });
        }
        for def in &self.hazards {
            let hazard = Hazard::new(def.rect);
            world.add_hazard(if def.visible { hazard } else { hazard.invisible() });
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;

    #[test]
    fn test_demo_is_valid() {
        let level = Level::demo();
        assert!(level.validate().is_ok());
        let world = level.build_world(&Settings::default());
        assert_eq!(world.platforms.len(), 5);
        assert_eq!(world.hazards.len(), 1);
        assert_eq!(world.spawn, Vec2::new(100.0, 500.0));
        assert!(world.platforms[4].is_moving());
        assert!(world.player.sprite.texture.is_placeholder());
        assert_eq!(world.player.sprite.animation.frame_count(), PLAYER_FRAME_COUNT);
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{
            "name": "tiny",
            "player": { "spawn": [10.0, 20.0], "size": [32.0, 64.0] },
            "platforms": [
                { "rect": { "x": 0.0, "y": 500.0, "w": 800.0, "h": 40.0 } },
                { "rect": { "x": 0.0, "y": 300.0, "w": 100.0, "h": 20.0 },
                  "oscillation": { "speed": 80.0, "left_bound": 0.0, "right_bound": 400.0 },
                  "visible": false }
            ]
        }"#;
        let level = Level::from_json(json, "inline").unwrap();
        assert_eq!(level.world_width, DESIGN_WIDTH);
        assert!(level.hazards.is_empty());

        let world = level.build_world(&Settings::default());
        assert_eq!(world.bounds.height, DESIGN_HEIGHT);
        assert_eq!(world.player.rect, Rect::new(10.0, 20.0, 32.0, 64.0));
        assert!(world.platforms[0].sprite.is_some());
        assert!(world.platforms[1].sprite.is_none());
        match world.platforms[1].kind {
            PlatformKind::Oscillating(osc) => assert_eq!(osc.right_bound, 400.0),
            PlatformKind::Static => panic!("expected oscillating platform"),
        }
    }

    #[test]
    fn test_rejects_zero_sized_platform() {
        let mut level = Level::demo();
        level.platforms[0].rect.w = 0.0;
        assert!(matches!(level.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = Level::from_json("{ not json", "levels/bad.json").unwrap_err();
        assert!(err.to_string().contains("levels/bad.json"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("loopy-level-{}.json", std::process::id()));
        let level = Level::demo();
        fs::write(&path, serde_json::to_string_pretty(&level).unwrap()).unwrap();
        let loaded = Level::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Level::load("/nonexistent/loopy/level.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

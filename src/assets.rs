//! Optional sprite assets
//!
//! Art is never required: every missing image falls back to a flat placeholder
//! box, and hitboxes are computed from the resulting box either way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;
use crate::tuning::Tuning;

/// Errors from decoding raw sprite data
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("sprite has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Straight-alpha RGBA image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Wrap a tightly packed RGBA8 buffer
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(AssetError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color image
    pub fn flat(width: u32, height: u32, color: [u8; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Grayscale with a warm stone tint; transparent pixels are untouched
    pub fn stone_tint(&self) -> Self {
        let pixels = self
            .pixels
            .iter()
            .map(|&[r, g, b, a]| {
                if a == 0 {
                    return [r, g, b, a];
                }
                let gray = ((r as u16 + g as u16 + b as u16) / 3) as u8;
                [gray.saturating_add(20), gray.saturating_add(10), gray, a]
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Flat color of the petrified placeholder
pub const STONE_PLACEHOLDER: [u8; 4] = [150, 150, 150, 255];

/// Everything the simulation may draw on, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub player: Option<Sprite>,
    pub obstacles: [Option<Sprite>; ObstacleKind::COUNT],
}

impl AssetCatalog {
    /// No art at all; every entity uses its placeholder box
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, sprite: Sprite) -> Self {
        self.player = Some(sprite);
        self
    }

    pub fn with_obstacle(mut self, kind: ObstacleKind, sprite: Sprite) -> Self {
        self.obstacles[kind.index()] = Some(sprite);
        self
    }

    /// Player box size: sprite scaled to the render width, else the placeholder
    pub fn player_size(&self, tuning: &Tuning) -> Vec2 {
        match &self.player {
            Some(sprite) => {
                let scale = tuning.player_render_width / sprite.width as f32;
                Vec2::new(tuning.player_render_width, (sprite.height as f32 * scale).floor())
            }
            None => {
                log::warn!("Player sprite missing, using placeholder box");
                Vec2::new(tuning.placeholder_player_size.0, tuning.placeholder_player_size.1)
            }
        }
    }

    /// Obstacle box size per kind: nominal art size, else the placeholder
    pub fn obstacle_sizes(&self, tuning: &Tuning) -> [Vec2; ObstacleKind::COUNT] {
        ObstacleKind::ALL.map(|kind| {
            if self.obstacles[kind.index()].is_some() {
                kind.art_size()
            } else {
                log::warn!("Obstacle art for {} missing, using placeholder box", kind.as_str());
                Vec2::new(tuning.placeholder_obstacle_size.0, tuning.placeholder_obstacle_size.1)
            }
        })
    }
}

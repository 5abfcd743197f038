//! Read-only frame snapshot
//!
//! Everything a drawing backend needs for one frame, derived from the game
//! state without touching it.

use glam::Vec2;

use super::instance::ParticleInstance;
use crate::sim::{DeathPhase, GamePhase, GameState, Locomotion, ObstacleKind, Player, Rect};

/// Frames in the jump strip; the first half is the rise, the second the fall
pub const JUMP_FRAMES: u8 = 6;
/// Frames in the hurt strip
pub const HURT_FRAMES: u8 = 3;

/// What to draw for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerVisual {
    Idle,
    Running,
    Jumping { frame: u8 },
    Hurt { frame: u8 },
    /// Last pose held still
    Frozen,
    /// Stone-tinted image
    Stone,
    /// Stone image with the crack overlay at this alpha
    Cracking { alpha: u8 },
    /// Only the debris particles are drawn
    Crumbling,
    Gone,
}

impl PlayerVisual {
    pub fn of(player: &Player, hurt_duration: u32) -> Self {
        if let Some(phase) = player.death_phase() {
            return match phase {
                DeathPhase::Freeze => PlayerVisual::Frozen,
                DeathPhase::Stone => PlayerVisual::Stone,
                DeathPhase::Crack => PlayerVisual::Cracking {
                    alpha: player.death().map_or(0, |d| d.crack_alpha()),
                },
                DeathPhase::Crumble | DeathPhase::Dust => PlayerVisual::Crumbling,
                DeathPhase::Done => PlayerVisual::Gone,
            };
        }

        if let Some(timer) = player.hurt_timer() {
            let frame = (timer * HURT_FRAMES as u32 / hurt_duration.max(1)).min(HURT_FRAMES as u32 - 1);
            return PlayerVisual::Hurt { frame: frame as u8 };
        }

        match player.locomotion() {
            Locomotion::Idle => PlayerVisual::Idle,
            Locomotion::Running => PlayerVisual::Running,
            Locomotion::Jumping => PlayerVisual::Jumping {
                frame: jump_frame(player.vel_y),
            },
        }
    }

    /// Whether the player's own box is drawn (as opposed to debris only)
    pub fn draws_body(self) -> bool {
        !matches!(self, PlayerVisual::Crumbling | PlayerVisual::Gone)
    }
}

fn jump_frame(vel_y: f32) -> u8 {
    let half = JUMP_FRAMES / 2;
    let step = (vel_y.abs() / 3.0) as u8;
    if vel_y < 0.0 {
        step.min(half - 1)
    } else {
        half.saturating_add(step).min(JUMP_FRAMES - 1)
    }
}

/// One obstacle as drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub rect: Rect,
    pub kind: ObstacleKind,
    /// Vertical draw offset; the collision box does not move
    pub bob_offset: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct FrameView {
    pub phase: GamePhase,
    pub score: u64,
    pub health: u8,
    pub max_health: u8,
    /// Base speed for background parallax
    pub scroll_speed: f32,
    pub shake_offset: Vec2,
    pub player_rect: Rect,
    pub player: PlayerVisual,
    pub obstacles: Vec<ObstacleView>,
    /// Destruction bursts then death debris, back to front
    pub particles: Vec<ParticleInstance>,
    /// Polygon fragments: instance index and outline relative to its position.
    /// Instances without an entry are drawn as quads.
    pub outlines: Vec<(usize, Vec<Vec2>)>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                rect: o.rect,
                kind: o.kind,
                bob_offset: o.bob_offset(),
            })
            .collect();

        let debris = state
            .player
            .death()
            .into_iter()
            .flat_map(|d| d.particles().iter());
        let mut particles = Vec::new();
        let mut outlines = Vec::new();
        for particle in state.effects.iter().flat_map(|set| set.iter()).chain(debris) {
            if let Some(outline) = particle.outline() {
                outlines.push((particles.len(), outline));
            }
            particles.push(ParticleInstance::from_particle(particle));
        }

        Self {
            phase: state.phase,
            score: state.score,
            health: state.player.health(),
            max_health: state.player.max_health(),
            scroll_speed: state.speed,
            shake_offset: state.shake.offset,
            player_rect: state.player.rect,
            player: PlayerVisual::of(&state.player, state.tuning.hurt_duration),
            obstacles,
            particles,
            outlines,
        }
    }
}

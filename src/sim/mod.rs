//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod death;
pub mod difficulty;
pub mod obstacle;
pub mod particle;
pub mod player;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, significant_overlap};
pub use death::{CrackPattern, CrackSegment, DeathPhase, DeathSequence};
pub use obstacle::{Obstacle, ObstacleKind};
pub use particle::{FragmentShape, Particle, ParticleKind, ParticleSet};
pub use player::{DamageOutcome, Locomotion, Player};
pub use rect::{HitboxFraction, PLAYER_HITBOX, Rect};
pub use spawner::{SpawnPattern, Spawner};
pub use state::{GameEvent, GamePhase, GameState, ScreenShake};
pub use tick::{TickInput, tick};

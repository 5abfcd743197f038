//! Tomb Bound - A side-scrolling tomb runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, particles, collisions)
//! - `game`: Simulation core service wiring the sim to its collaborators
//! - `tuning`: Data-driven game balance
//! - `assets`: Optional sprites with placeholder fallback
//! - `audio`: Audio cue interface
//! - `highscores`: Score persistence
//! - `renderer`: Read-only render view of the simulation

pub mod assets;
pub mod audio;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (reference pacing)
pub mod consts {
    /// Reference simulation rate; every duration below is in ticks at this rate
    pub const SIM_HZ: u32 = 60;

    /// Play field
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Y coordinate of the ground line (bottom edge of grounded entities)
    pub const GROUND_Y: f32 = 560.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_RENDER_WIDTH: f32 = 180.0;
    pub const MAX_HEALTH: u8 = 3;
    pub const JUMP_IMPULSE: f32 = -15.0;
    pub const GRAVITY: f32 = 0.8;
    pub const HURT_DURATION: u32 = 30;

    /// Death sequence phase durations
    pub const FREEZE_DURATION: u32 = 30;
    pub const STONE_DURATION: u32 = 20;
    pub const CRACK_DURATION: u32 = 30;
    pub const CRUMBLE_DURATION: u32 = 60;
    pub const DUST_DURATION: u32 = 120;

    /// Collision
    pub const MIN_OVERLAP_AREA: f32 = 50.0;
}

/// Re-derive a per-tick probability tuned at `SIM_HZ` for another tick rate,
/// keeping the expected number of events per second unchanged.
#[inline]
pub fn rescale_probability(p: f32, tick_rate_hz: u32) -> f32 {
    if tick_rate_hz == consts::SIM_HZ || tick_rate_hz == 0 {
        return p;
    }
    let exponent = consts::SIM_HZ as f32 / tick_rate_hz as f32;
    1.0 - (1.0 - p.clamp(0.0, 1.0)).powf(exponent)
}

//! Game state and core simulation types
//!
//! All state needed to reproduce a run lives here and serializes with serde.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::death::DeathPhase;
use super::obstacle::{Obstacle, ObstacleKind};
use super::particle::ParticleSet;
use super::player::Player;
use super::spawner::{SpawnPattern, Spawner};
use crate::assets::AssetCatalog;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died; only the death animation and particles keep running
    GameOver,
}

/// Something that happened during a tick, for collaborators outside the sim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Hurt { health: u8 },
    Died { score: u64 },
    ObstacleDestroyed { kind: ObstacleKind, center: Vec2 },
    ObstacleSpawned { kind: ObstacleKind, pattern: SpawnPattern },
    DeathPhaseChanged(DeathPhase),
    SpeedIncreased { speed: f32 },
    DeathSequenceFinished,
}

/// Decaying camera shake
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub amount: f32,
    /// Render offset for this tick
    pub offset: Vec2,
}

impl ScreenShake {
    /// Below this the shake snaps to zero
    pub const CUTOFF: f32 = 0.1;

    pub fn trigger(&mut self, amount: f32) {
        self.amount = self.amount.max(amount);
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0.0
    }

    /// Pick this tick's offset, then decay
    pub fn update<R: Rng + ?Sized>(&mut self, decay: f32, rng: &mut R) {
        if !self.is_active() {
            return;
        }
        let extent = self.amount.trunc();
        self.offset = Vec2::new(
            rng.random_range(-extent..=extent),
            rng.random_range(-extent..=extent),
        );
        self.amount *= decay;
        if self.amount < Self::CUTOFF {
            self.amount = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single source of randomness for the whole run
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// One point per active tick
    pub score: u64,
    /// Current base speed for new obstacles and the background
    pub speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Destruction bursts still animating
    pub effects: Vec<ParticleSet>,
    pub spawner: Spawner,
    pub shake: ScreenShake,
    /// Events raised since the last drain. `tick` only appends; whoever
    /// drives it must call `drain_events` (as `Game::step` does every tick).
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with reference tuning and placeholder art
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        let assets = AssetCatalog::placeholder();
        Self::build(seed, tuning, &assets)
    }

    /// Create a new game with custom tuning, rejecting invalid values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Self::with_assets(seed, tuning, &AssetCatalog::placeholder())
    }

    pub fn with_assets(seed: u64, tuning: Tuning, assets: &AssetCatalog) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning, assets))
    }

    fn build(seed: u64, tuning: Tuning, assets: &AssetCatalog) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(&tuning, assets);
        let spawner = Spawner::new(assets.obstacle_sizes(&tuning), &tuning, &mut rng);
        log::info!("New run with seed {seed}");
        Self {
            seed,
            rng,
            speed: tuning.initial_speed,
            tuning,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            obstacles: Vec::new(),
            effects: Vec::new(),
            spawner,
            shake: ScreenShake::default(),
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

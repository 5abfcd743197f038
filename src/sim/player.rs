//! Player state machine
//!
//! Locomotion (idle/running/jumping), a timed hurt window, and a terminal
//! death state that hands control to a `DeathSequence`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::death::{DeathPhase, DeathSequence};
use super::rect::{PLAYER_HITBOX, Rect};
use crate::assets::{AssetCatalog, Sprite};
use crate::tuning::Tuning;

/// Ground/air movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    Idle,
    Running,
    Jumping,
}

/// Result of delivering one unit of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already hurt or dead; nothing changed
    Ignored,
    /// Health dropped and the hurt window started
    Hurt,
    /// Health reached zero; the death sequence started
    Died,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    health: u8,
    max_health: u8,
    locomotion: Locomotion,
    /// Ticks elapsed in the hurt window, while hurt
    hurt_timer: Option<u32>,
    /// Present from the moment of death
    death: Option<DeathSequence>,
    sprite: Option<Sprite>,
}

impl Player {
    pub fn new(tuning: &Tuning, assets: &AssetCatalog) -> Self {
        let size = assets.player_size(tuning);
        Self {
            rect: Rect::on_ground(tuning.player_x, tuning.ground_y, size),
            vel_y: 0.0,
            health: tuning.max_health,
            max_health: tuning.max_health,
            locomotion: Locomotion::Idle,
            hurt_timer: None,
            death: None,
            sprite: assets.player.clone(),
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn max_health(&self) -> u8 {
        self.max_health
    }

    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt_timer.is_some()
    }

    pub fn hurt_timer(&self) -> Option<u32> {
        self.hurt_timer
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    pub fn death(&self) -> Option<&DeathSequence> {
        self.death.as_ref()
    }

    pub fn death_phase(&self) -> Option<DeathPhase> {
        self.death.as_ref().map(DeathSequence::phase)
    }

    /// Death sequence finished; the player is gone from play and from screen
    pub fn is_removed(&self) -> bool {
        self.death.as_ref().is_some_and(DeathSequence::is_done)
    }

    /// Reduced collision box
    pub fn hitbox(&self) -> Rect {
        self.rect.fraction(&PLAYER_HITBOX)
    }

    /// Start a jump. Ignored while airborne, hurt or dead.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.locomotion == Locomotion::Jumping || self.is_hurt() || self.is_dead() {
            return false;
        }
        self.locomotion = Locomotion::Jumping;
        self.vel_y = tuning.jump_impulse;
        true
    }

    /// Deliver one unit of damage
    pub fn take_damage<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DamageOutcome {
        if self.is_hurt() || self.is_dead() {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.hurt_timer = None;
            self.vel_y = 0.0;
            self.death = Some(DeathSequence::begin(self.rect, self.sprite.as_ref(), rng));
            log::info!("Player died");
            DamageOutcome::Died
        } else {
            self.hurt_timer = Some(0);
            DamageOutcome::Hurt
        }
    }

    /// Advance one tick. While dead only the death clock runs; the returned
    /// phase is set when the death sequence changed phase this tick.
    pub fn update<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<DeathPhase> {
        if let Some(death) = &mut self.death {
            return death.update(tuning, rng);
        }

        // Hurt suspends gravity and movement
        if let Some(timer) = &mut self.hurt_timer {
            *timer += 1;
            if *timer >= tuning.hurt_duration {
                self.hurt_timer = None;
            }
            return None;
        }

        match self.locomotion {
            Locomotion::Jumping => {
                self.vel_y += tuning.gravity;
                self.rect.y += self.vel_y;
                if self.rect.bottom() >= tuning.ground_y {
                    self.rect.set_bottom(tuning.ground_y);
                    self.vel_y = 0.0;
                    self.locomotion = Locomotion::Running;
                }
            }
            Locomotion::Idle | Locomotion::Running => {
                self.rect.set_bottom(tuning.ground_y);
                self.locomotion = Locomotion::Running;
            }
        }

        None
    }

    /// Simulate death debris, if any
    pub fn step_particles<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        if let Some(death) = &mut self.death {
            death.step_particles(tuning, rng);
        }
    }
}

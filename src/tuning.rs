//! Data-driven game balance
//!
//! Every pacing constant the simulation reads lives here. Defaults reproduce
//! the reference feel at 60 ticks per second; a JSON document may override any
//! subset of fields. Values are validated once at construction so per-tick code
//! never has to second-guess them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Invalid configuration, rejected before a simulation is built
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("duration `{0}` must be at least one tick")]
    ZeroDuration(&'static str),

    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f32 },

    #[error("range `{0}` has min greater than max")]
    InvertedRange(&'static str),

    #[error("`{name}` is out of range: {reason}")]
    OutOfRange {
        name: &'static str,
        reason: &'static str,
    },

    #[error("tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tuning IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Death sequence pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathTuning {
    pub freeze_duration: u32,
    pub stone_duration: u32,
    pub crack_duration: u32,
    pub crumble_duration: u32,
    pub dust_duration: u32,
    /// Shake impulse fired on entering the crumble phase
    pub crumble_shake: f32,
    /// Fragments lower than `screen_height - dust_ground_margin` may kick up dust
    pub dust_ground_margin: f32,
    /// Per-tick chance (at `SIM_HZ`) that a grounded fragment kicks up dust
    pub dust_chance: f32,
    /// Per-tick size loss of death fragments
    pub fragment_shrink: f32,
}

impl Default for DeathTuning {
    fn default() -> Self {
        Self {
            freeze_duration: FREEZE_DURATION,
            stone_duration: STONE_DURATION,
            crack_duration: CRACK_DURATION,
            crumble_duration: CRUMBLE_DURATION,
            dust_duration: DUST_DURATION,
            crumble_shake: 10.0,
            dust_ground_margin: 50.0,
            dust_chance: 0.05,
            fragment_shrink: 0.1,
        }
    }
}

impl DeathTuning {
    /// Ticks from death until the sequence reaches `Done`
    pub fn total_ticks(&self) -> u32 {
        self.freeze_duration
            + self.stone_duration
            + self.crack_duration
            + self.crumble_duration
            + self.dust_duration
    }
}

/// Complete balance sheet for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Rate the host ticks the simulation at (probabilities are re-derived from it)
    pub tick_rate_hz: u32,

    // === Geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_y: f32,
    pub player_x: f32,
    /// Player sprites are scaled to this width, preserving aspect
    pub player_render_width: f32,
    pub placeholder_player_size: (f32, f32),
    pub placeholder_obstacle_size: (f32, f32),

    // === Player ===
    pub max_health: u8,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub hurt_duration: u32,

    // === Death ===
    pub death: DeathTuning,
    /// Shake impulse fired on the tick the player dies
    pub death_shake: f32,
    /// Multiplicative per-tick decay of screen shake
    pub shake_decay: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub speed_step_ticks: u64,
    pub spawn_interval_base: i64,
    pub spawn_interval_floor: i64,
    pub spawn_score_divisor: u64,
    /// Inclusive signed jitter, asymmetric to favour longer gaps
    pub spawn_jitter: (i64, i64),
    pub long_gap_chance: f32,
    pub long_gap_bonus: (i64, i64),
    pub min_spawn_interval: i64,
    /// Timer value after an admitted spawn (inclusive range)
    pub spawn_timer_reset: (i64, i64),

    // === Spacing ===
    pub min_distance_base: f32,
    pub min_distance_speed_ref: f32,
    pub min_distance_per_speed: f32,

    // === Patterns ===
    pub pattern_chance_base: f32,
    pub pattern_chance_score_divisor: f32,
    pub pattern_chance_cap: f32,
    pub double_offset: (i32, i32),
    pub double_speed_factor: f32,
    pub staggered_offset: (i32, i32),

    // === Collision ===
    pub min_overlap_area: f32,
    pub burst_count: usize,
    pub burst_max_lifetime: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: SIM_HZ,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_y: GROUND_Y,
            player_x: PLAYER_X,
            player_render_width: PLAYER_RENDER_WIDTH,
            placeholder_player_size: (40.0, 60.0),
            placeholder_obstacle_size: (60.0, 90.0),

            max_health: MAX_HEALTH,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            hurt_duration: HURT_DURATION,

            death: DeathTuning::default(),
            death_shake: 10.0,
            shake_decay: 0.9,

            initial_speed: 4.0,
            speed_increment: 0.5,
            speed_step_ticks: 300,
            spawn_interval_base: 140,
            spawn_interval_floor: 90,
            spawn_score_divisor: 1000,
            spawn_jitter: (-20, 40),
            long_gap_chance: 0.25,
            long_gap_bonus: (60, 100),
            min_spawn_interval: 70,
            spawn_timer_reset: (0, 15),

            min_distance_base: 350.0,
            min_distance_speed_ref: 8.0,
            min_distance_per_speed: 15.0,

            pattern_chance_base: 0.03,
            pattern_chance_score_divisor: 15000.0,
            pattern_chance_cap: 0.15,
            double_offset: (350, 450),
            double_speed_factor: 0.95,
            staggered_offset: (400, 500),

            min_overlap_area: MIN_OVERLAP_AREA,
            burst_count: 15,
            burst_max_lifetime: 30,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Per-tick dust chance at the configured tick rate
    pub fn dust_chance_per_tick(&self) -> f32 {
        crate::rescale_probability(self.death.dust_chance, self.tick_rate_hz)
    }

    /// Reject values that would break pacing guarantees
    pub fn validate(&self) -> Result<(), TuningError> {
        let durations = [
            ("hurt_duration", self.hurt_duration),
            ("death.freeze_duration", self.death.freeze_duration),
            ("death.stone_duration", self.death.stone_duration),
            ("death.crack_duration", self.death.crack_duration),
            ("death.crumble_duration", self.death.crumble_duration),
            ("death.dust_duration", self.death.dust_duration),
            ("burst_max_lifetime", self.burst_max_lifetime),
            ("tick_rate_hz", self.tick_rate_hz),
        ];
        for (name, ticks) in durations {
            if ticks == 0 {
                return Err(TuningError::ZeroDuration(name));
            }
        }
        if self.speed_step_ticks == 0 {
            return Err(TuningError::ZeroDuration("speed_step_ticks"));
        }
        if self.spawn_score_divisor == 0 {
            return Err(TuningError::ZeroDuration("spawn_score_divisor"));
        }
        if self.min_spawn_interval <= 0 {
            return Err(TuningError::ZeroDuration("min_spawn_interval"));
        }

        let positives = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ground_y", self.ground_y),
            ("player_render_width", self.player_render_width),
            ("placeholder_player_size.0", self.placeholder_player_size.0),
            ("placeholder_player_size.1", self.placeholder_player_size.1),
            ("placeholder_obstacle_size.0", self.placeholder_obstacle_size.0),
            ("placeholder_obstacle_size.1", self.placeholder_obstacle_size.1),
            ("gravity", self.gravity),
            ("initial_speed", self.initial_speed),
            ("min_distance_base", self.min_distance_base),
            ("pattern_chance_score_divisor", self.pattern_chance_score_divisor),
            ("double_speed_factor", self.double_speed_factor),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }
        if self.max_health == 0 {
            return Err(TuningError::NonPositive {
                name: "max_health",
                value: 0.0,
            });
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::OutOfRange {
                name: "jump_impulse",
                reason: "must point upward (negative)",
            });
        }
        if self.ground_y > self.screen_height {
            return Err(TuningError::OutOfRange {
                name: "ground_y",
                reason: "must not lie below the screen",
            });
        }
        if !(self.shake_decay > 0.0 && self.shake_decay < 1.0) {
            return Err(TuningError::OutOfRange {
                name: "shake_decay",
                reason: "must lie strictly between 0 and 1",
            });
        }
        if self.speed_increment < 0.0 || self.min_overlap_area < 0.0 {
            return Err(TuningError::OutOfRange {
                name: "speed_increment/min_overlap_area",
                reason: "must not be negative",
            });
        }

        let probabilities = [
            ("death.dust_chance", self.death.dust_chance),
            ("long_gap_chance", self.long_gap_chance),
            ("pattern_chance_base", self.pattern_chance_base),
            ("pattern_chance_cap", self.pattern_chance_cap),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { name, value });
            }
        }

        let ranges = [
            ("spawn_jitter", self.spawn_jitter),
            ("long_gap_bonus", self.long_gap_bonus),
            ("spawn_timer_reset", self.spawn_timer_reset),
        ];
        for (name, (min, max)) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange(name));
            }
        }
        for (name, (min, max)) in [
            ("double_offset", self.double_offset),
            ("staggered_offset", self.staggered_offset),
        ] {
            if min > max {
                return Err(TuningError::InvertedRange(name));
            }
            if min <= 0 {
                return Err(TuningError::OutOfRange {
                    name,
                    reason: "pattern offsets must place the follower to the right",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().death.total_ticks(), 260);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "initial_speed": 6.5, "death": { "dust_duration": 90 } }"#)
            .unwrap();
        assert_eq!(tuning.initial_speed, 6.5);
        assert_eq!(tuning.death.dust_duration, 90);
        assert_eq!(tuning.death.freeze_duration, FREEZE_DURATION);
        assert_eq!(tuning.max_health, MAX_HEALTH);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Tuning::from_json(r#"{ "hurt_duration": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ZeroDuration("hurt_duration")));

        let mut tuning = Tuning::default();
        tuning.death.crack_duration = 0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ZeroDuration("death.crack_duration"))
        ));
    }

    #[test]
    fn test_bad_values_rejected() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NonPositive { .. })));

        let tuning = Tuning {
            long_gap_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::Probability { .. })));

        let tuning = Tuning {
            spawn_jitter: (40, -20),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange("spawn_jitter"))
        ));

        let tuning = Tuning {
            jump_impulse: 15.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::OutOfRange { .. })));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }
}

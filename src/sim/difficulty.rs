//! Difficulty scheduling
//!
//! Every value here is a pure function of the cumulative score (plus RNG draws
//! where jitter is involved); nothing is stored between ticks.

use rand::Rng;

use crate::tuning::Tuning;

/// Obstacle base speed: steps up by `speed_increment` every `speed_step_ticks`
pub fn base_speed(score: u64, tuning: &Tuning) -> f32 {
    let steps = score / tuning.speed_step_ticks;
    tuning.initial_speed + steps as f32 * tuning.speed_increment
}

/// Spawn interval before jitter: shrinks by one tick per divisor of score, floored
pub fn base_spawn_interval(score: u64, tuning: &Tuning) -> i64 {
    let reduction = (score / tuning.spawn_score_divisor).min(i64::MAX as u64) as i64;
    (tuning.spawn_interval_base - reduction).max(tuning.spawn_interval_floor)
}

/// Jittered spawn interval. Jitter favours longer gaps, with an occasional
/// breather on top, and the result never drops below `min_spawn_interval`.
pub fn spawn_interval<R: Rng + ?Sized>(score: u64, tuning: &Tuning, rng: &mut R) -> i64 {
    let (lo, hi) = tuning.spawn_jitter;
    let mut variation = rng.random_range(lo..=hi);
    if rng.random_bool(tuning.long_gap_chance as f64) {
        let (lo, hi) = tuning.long_gap_bonus;
        variation += rng.random_range(lo..=hi);
    }
    (base_spawn_interval(score, tuning) + variation).max(tuning.min_spawn_interval)
}

/// Lead distance a fresh obstacle needs from its predecessor at `speed`
pub fn min_spawn_distance(speed: f32, tuning: &Tuning) -> f32 {
    tuning.min_distance_base + (speed - tuning.min_distance_speed_ref) * tuning.min_distance_per_speed
}

/// Chance that an admitted spawn becomes a multi-obstacle pattern
pub fn pattern_chance(score: u64, tuning: &Tuning) -> f32 {
    (tuning.pattern_chance_base + score as f32 / tuning.pattern_chance_score_divisor)
        .min(tuning.pattern_chance_cap)
}

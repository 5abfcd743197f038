//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision;
use super::death::DeathPhase;
use super::difficulty::base_speed;
use super::player::DamageOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (space/up/tap)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Events are appended to `state.events` and kept across ticks, so a caller
/// driving this directly must drain them with `GameState::drain_events`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    // 1. Decay screen shake
    state.shake.update(state.tuning.shake_decay, &mut state.rng);

    // Game over: only the death animation and particle fade keep running
    if state.phase == GamePhase::GameOver {
        advance_player(state);
        advance_particles(state);
        return;
    }

    if input.jump && state.player.jump(&state.tuning) {
        state.events.push(GameEvent::Jumped);
    }

    // 2. Background scroll is derived from `state.speed` by the renderer

    // 3. Obstacles move, bob and fall off the left edge
    let ground_y = state.tuning.ground_y;
    state.obstacles.retain_mut(|o| o.update(ground_y));

    // 4. Player locomotion
    advance_player(state);

    // 5. Particle sets
    advance_particles(state);

    // 6. Spawner
    let before = state.obstacles.len();
    if let Some(pattern) = state.spawner.update(
        state.score,
        state.speed,
        &mut state.obstacles,
        &state.tuning,
        &mut state.rng,
    ) {
        for obstacle in &state.obstacles[before..] {
            state.events.push(GameEvent::ObstacleSpawned {
                kind: obstacle.kind,
                pattern,
            });
        }
    }

    // 7. Collision, after everything has moved
    if let Some(hit) = collision::resolve(
        &mut state.player,
        &mut state.obstacles,
        &mut state.effects,
        &state.tuning,
        &mut state.rng,
    ) {
        state.events.push(GameEvent::ObstacleDestroyed {
            kind: hit.kind,
            center: hit.center,
        });
        match hit.outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => {
                state.events.push(GameEvent::Hurt {
                    health: state.player.health(),
                });
            }
            DamageOutcome::Died => {
                state.phase = GamePhase::GameOver;
                state.shake.trigger(state.tuning.death_shake);
                state.events.push(GameEvent::Died { score: state.score });
                log::info!("Game over at score {}", state.score);
            }
        }
    }

    // A death-causing tick awards nothing further
    if state.phase == GamePhase::GameOver {
        return;
    }

    // 8. Score
    state.score += 1;

    // 9. Difficulty
    let speed = base_speed(state.score, &state.tuning);
    if speed > state.speed {
        log::debug!("Speed up to {speed:.1} at score {}", state.score);
        state.events.push(GameEvent::SpeedIncreased { speed });
    }
    state.speed = speed;
}

fn advance_player(state: &mut GameState) {
    let Some(phase) = state.player.update(&state.tuning, &mut state.rng) else {
        return;
    };
    state.events.push(GameEvent::DeathPhaseChanged(phase));
    match phase {
        DeathPhase::Crumble => state.shake.trigger(state.tuning.death.crumble_shake),
        DeathPhase::Done => state.events.push(GameEvent::DeathSequenceFinished),
        _ => {}
    }
}

fn advance_particles(state: &mut GameState) {
    for effect in &mut state.effects {
        effect.step();
    }
    state.effects.retain(|effect| !effect.is_empty());
    state.player.step_particles(&state.tuning, &mut state.rng);
}

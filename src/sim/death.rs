//! Petrify-and-crumble death sequence
//!
//! Phases run strictly forward: freeze, stone, crack, crumble, dust, done.
//! The visuals are synthesized from the player's sprite (or a flat placeholder
//! when there is none), so no dedicated death animation asset is needed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::{ParticleKind, ParticleSet};
use super::rect::Rect;
use crate::assets::{STONE_PLACEHOLDER, Sprite};
use crate::tuning::{DeathTuning, Tuning};

/// Stage of the terminal animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeathPhase {
    /// Character held in its last pose
    Freeze,
    /// Grayscale stone image substituted
    Stone,
    /// Crack overlay fades in
    Crack,
    /// Body shatters into fragments
    Crumble,
    /// Remaining debris and dust settle
    Dust,
    /// Terminal; nothing left to simulate or draw
    Done,
}

impl DeathPhase {
    pub const SEQUENCE: [DeathPhase; 6] = [
        DeathPhase::Freeze,
        DeathPhase::Stone,
        DeathPhase::Crack,
        DeathPhase::Crumble,
        DeathPhase::Dust,
        DeathPhase::Done,
    ];

    pub fn next(self) -> Self {
        match self {
            DeathPhase::Freeze => DeathPhase::Stone,
            DeathPhase::Stone => DeathPhase::Crack,
            DeathPhase::Crack => DeathPhase::Crumble,
            DeathPhase::Crumble => DeathPhase::Dust,
            DeathPhase::Dust | DeathPhase::Done => DeathPhase::Done,
        }
    }

    /// Ticks spent in this phase (`None` for the terminal phase)
    pub fn duration(self, tuning: &DeathTuning) -> Option<u32> {
        match self {
            DeathPhase::Freeze => Some(tuning.freeze_duration),
            DeathPhase::Stone => Some(tuning.stone_duration),
            DeathPhase::Crack => Some(tuning.crack_duration),
            DeathPhase::Crumble => Some(tuning.crumble_duration),
            DeathPhase::Dust => Some(tuning.dust_duration),
            DeathPhase::Done => None,
        }
    }

    /// Phases in which debris is simulated
    pub fn has_debris(self) -> bool {
        matches!(self, DeathPhase::Crumble | DeathPhase::Dust)
    }
}

/// One straight stroke of the crack overlay (box-local coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: u8,
}

/// Pending stroke in the crack worklist
#[derive(Debug, Clone, Copy)]
struct CrackSeed {
    origin: Vec2,
    angle: f32,
    length: f32,
    thickness: u8,
    depth: u8,
}

/// Branching crack overlay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrackPattern {
    pub segments: Vec<CrackSegment>,
}

impl CrackPattern {
    pub const MAX_DEPTH: u8 = 3;
    pub const MIN_LENGTH: f32 = 5.0;
    pub const BRANCH_CHANCE: f64 = 0.7;

    /// Cracks radiating from the centre of a `size` box, each branching in two
    /// with `BRANCH_CHANCE` until `MAX_DEPTH` or `MIN_LENGTH` is reached.
    pub fn generate<R: Rng + ?Sized>(size: Vec2, rng: &mut R) -> Self {
        let center = size * 0.5;
        let max_corner = (size - Vec2::ONE).max(Vec2::ZERO);

        let mut work: Vec<CrackSeed> = (0..rng.random_range(4..=7))
            .map(|_| CrackSeed {
                origin: center,
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                length: rng.random_range(0.5..=1.0) * size.x,
                thickness: 2,
                depth: 0,
            })
            .collect();

        let mut segments = Vec::new();
        while let Some(seed) = work.pop() {
            if seed.depth > Self::MAX_DEPTH || seed.length < Self::MIN_LENGTH {
                continue;
            }

            let dir = Vec2::new(seed.angle.cos(), seed.angle.sin());
            let end = (seed.origin + dir * seed.length).max(Vec2::ZERO).min(max_corner);
            segments.push(CrackSegment {
                from: seed.origin,
                to: end,
                thickness: seed.thickness,
            });

            if rng.random_bool(Self::BRANCH_CHANCE) {
                let length = seed.length * rng.random_range(0.4..=0.7);
                for _ in 0..2 {
                    work.push(CrackSeed {
                        origin: end,
                        angle: seed.angle + rng.random_range(-0.5..=0.5),
                        length,
                        thickness: seed.thickness.saturating_sub(1).max(1),
                        depth: seed.depth + 1,
                    });
                }
            }
        }

        Self { segments }
    }
}

/// The running death animation, owned by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathSequence {
    phase: DeathPhase,
    /// Ticks elapsed in the current phase
    timer: u32,
    /// Player box at the moment of death
    frozen: Rect,
    stone: Sprite,
    cracks: CrackPattern,
    crack_alpha: u8,
    particles: ParticleSet,
}

impl DeathSequence {
    /// Begin in `Freeze`, capturing the player's box and appearance
    pub fn begin<R: Rng + ?Sized>(frozen: Rect, sprite: Option<&Sprite>, rng: &mut R) -> Self {
        let stone = match sprite {
            Some(sprite) => sprite.stone_tint(),
            None => Sprite::flat(
                frozen.w.round() as u32,
                frozen.h.round() as u32,
                STONE_PLACEHOLDER,
            ),
        };
        Self {
            phase: DeathPhase::Freeze,
            timer: 0,
            frozen,
            stone,
            cracks: CrackPattern::generate(frozen.size(), rng),
            crack_alpha: 0,
            particles: ParticleSet::new(),
        }
    }

    pub fn phase(&self) -> DeathPhase {
        self.phase
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn frozen_rect(&self) -> &Rect {
        &self.frozen
    }

    pub fn stone(&self) -> &Sprite {
        &self.stone
    }

    pub fn cracks(&self) -> &CrackPattern {
        &self.cracks
    }

    pub fn crack_alpha(&self) -> u8 {
        self.crack_alpha
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn is_done(&self) -> bool {
        self.phase == DeathPhase::Done
    }

    /// Advance the phase clock. Returns the new phase when a transition happens.
    /// Entering `Crumble` shatters the frozen box into fragments.
    pub fn update<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<DeathPhase> {
        let duration = self.phase.duration(&tuning.death)?;

        self.timer += 1;
        let mut changed = None;
        if self.timer >= duration {
            self.phase = self.phase.next();
            self.timer = 0;
            changed = Some(self.phase);
            log::debug!("Death sequence entered {:?}", self.phase);

            match self.phase {
                DeathPhase::Crumble => {
                    self.particles
                        .shatter(&self.frozen, tuning.death.fragment_shrink, rng);
                }
                DeathPhase::Done => self.particles.clear(),
                _ => {}
            }
        }

        if self.phase == DeathPhase::Crack {
            let progress = self.timer as f32 / tuning.death.crack_duration as f32;
            self.crack_alpha = (255.0 * progress).min(255.0) as u8;
        }

        changed
    }

    /// Simulate debris and dust. Fragments near the ground occasionally kick
    /// up a puff of dust.
    pub fn step_particles<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        if !self.phase.has_debris() {
            return;
        }

        self.particles.step();

        let ground_line = tuning.screen_height - tuning.death.dust_ground_margin;
        let chance = tuning.dust_chance_per_tick() as f64;
        let landing: Vec<Vec2> = self
            .particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Fragment { .. }) && p.pos.y > ground_line)
            .map(|p| p.pos)
            .collect();
        for pos in landing {
            if rng.random_bool(chance) {
                self.particles.puff(pos, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn frozen() -> Rect {
        Rect::new(50.0, 500.0, 40.0, 60.0)
    }

    #[test]
    fn test_phases_run_forward_with_exact_durations() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seq = DeathSequence::begin(frozen(), None, &mut rng);

        let mut visited = vec![seq.phase()];
        let mut transitions_at = Vec::new();
        let mut ticks = 0u32;
        while !seq.is_done() {
            ticks += 1;
            if let Some(phase) = seq.update(&tuning, &mut rng) {
                assert!(phase > *visited.last().unwrap());
                visited.push(phase);
                transitions_at.push(ticks);
            }
            seq.step_particles(&tuning, &mut rng);
            assert!(ticks <= 260);
        }

        assert_eq!(visited, DeathPhase::SEQUENCE.to_vec());
        assert_eq!(transitions_at, vec![30, 50, 80, 140, 260]);
        assert_eq!(ticks, tuning.death.total_ticks());
        assert!(seq.particles().is_empty());

        // Terminal phase is inert
        assert!(seq.update(&tuning, &mut rng).is_none());
        assert_eq!(seq.phase(), DeathPhase::Done);
    }

    #[test]
    fn test_crack_alpha_ramps_linearly() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut seq = DeathSequence::begin(frozen(), None, &mut rng);
        while seq.phase() != DeathPhase::Crack {
            seq.update(&tuning, &mut rng);
        }
        assert_eq!(seq.crack_alpha(), 0);
        for _ in 0..15 {
            seq.update(&tuning, &mut rng);
        }
        assert_eq!(seq.crack_alpha(), 127);
    }

    #[test]
    fn test_crumble_spawns_fragments_and_dust() {
        let tuning = Tuning {
            death: DeathTuning {
                dust_chance: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        // Box already near the ground so fragments qualify immediately
        let mut seq = DeathSequence::begin(Rect::new(50.0, 555.0, 40.0, 40.0), None, &mut rng);
        while seq.phase() != DeathPhase::Crumble {
            seq.update(&tuning, &mut rng);
        }
        assert_eq!(seq.particles().fragment_count(), 60);

        seq.step_particles(&tuning, &mut rng);
        let dust = seq
            .particles()
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Dust { .. }))
            .count();
        assert!(dust > 0);
    }

    #[test]
    fn test_no_dust_above_ground_line() {
        let tuning = Tuning {
            death: DeathTuning {
                dust_chance: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seq = DeathSequence::begin(Rect::new(50.0, 100.0, 40.0, 60.0), None, &mut rng);
        while seq.phase() != DeathPhase::Crumble {
            seq.update(&tuning, &mut rng);
        }
        let ground_line = tuning.screen_height - tuning.death.dust_ground_margin;
        for _ in 0..10 {
            seq.step_particles(&tuning, &mut rng);
            assert!(seq.particles().iter().all(|p| p.pos.y < ground_line));
        }
        let dust = seq
            .particles()
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Dust { .. }))
            .count();
        assert_eq!(dust, 0);
        assert!(seq.particles().fragment_count() > 0);
    }

    #[test]
    fn test_stone_image_fallback_and_tint() {
        let mut rng = Pcg32::seed_from_u64(4);
        let seq = DeathSequence::begin(frozen(), None, &mut rng);
        assert_eq!((seq.stone().width, seq.stone().height), (40, 60));
        assert!(seq.stone().pixels.iter().all(|p| *p == STONE_PLACEHOLDER));

        let sprite = Sprite::flat(4, 4, [30, 60, 90, 255]);
        let seq = DeathSequence::begin(frozen(), Some(&sprite), &mut rng);
        assert_eq!(seq.stone().pixels[0], [80, 70, 60, 255]);
    }

    #[test]
    fn test_crack_pattern_is_bounded_and_deterministic() {
        let size = Vec2::new(180.0, 200.0);
        let a = CrackPattern::generate(size, &mut Pcg32::seed_from_u64(77));
        let b = CrackPattern::generate(size, &mut Pcg32::seed_from_u64(77));
        assert_eq!(a, b);
        assert!(a.segments.len() >= 4);
        // 7 roots, each a binary tree of depth <= 3
        assert!(a.segments.len() <= 7 * 15);
        for s in &a.segments {
            assert!(s.to.x >= 0.0 && s.to.x <= size.x - 1.0);
            assert!(s.to.y >= 0.0 && s.to.y <= size.y - 1.0);
            assert!((1..=2).contains(&s.thickness));
        }
    }
}

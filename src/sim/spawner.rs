//! Obstacle spawner: pacing, spacing admission and pattern generation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{min_spawn_distance, pattern_chance, spawn_interval};
use super::obstacle::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Shape of an admitted spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPattern {
    Single,
    /// Two obstacles; the follower is a jumpable distance behind and slower
    Double,
    /// Two same-speed obstacles with a wider gap
    Staggered,
}

impl SpawnPattern {
    pub fn obstacle_count(self) -> usize {
        match self {
            SpawnPattern::Single => 1,
            SpawnPattern::Double | SpawnPattern::Staggered => 2,
        }
    }
}

/// Decides when and what to spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks since the last admitted spawn (starts from a small random reset)
    timer: i64,
    /// Jittered target interval for the current cycle
    interval: i64,
    next_id: u32,
    /// Box size per obstacle kind (art size or placeholder)
    sizes: [Vec2; ObstacleKind::COUNT],
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(sizes: [Vec2; ObstacleKind::COUNT], tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            timer: 0,
            interval: spawn_interval(0, tuning, rng),
            next_id: 1,
            sizes,
        }
    }

    pub fn timer(&self) -> i64 {
        self.timer
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn size_of(&self, kind: ObstacleKind) -> Vec2 {
        self.sizes[kind.index()]
    }

    /// Admission rule: a new obstacle enters at the right screen edge and must
    /// lead every existing obstacle by at least the speed-scaled distance.
    pub fn can_admit(obstacles: &[Obstacle], speed: f32, tuning: &Tuning) -> bool {
        let min_distance = min_spawn_distance(speed, tuning);
        let spawn_x = tuning.screen_width;
        obstacles.iter().all(|o| spawn_x - o.rect.x >= min_distance)
    }

    /// Advance the spawn timer and spawn if due and admitted.
    ///
    /// A rejected attempt keeps the timer running, so the spawn is retried on
    /// the next tick instead of starting a new cycle.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        score: u64,
        speed: f32,
        obstacles: &mut Vec<Obstacle>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<SpawnPattern> {
        self.timer += 1;
        if self.timer <= self.interval {
            return None;
        }

        if !Self::can_admit(obstacles, speed, tuning) {
            log::trace!("Spawn deferred at timer {} (obstacle too close)", self.timer);
            return None;
        }

        let pattern = self.spawn(score, speed, obstacles, tuning, rng);

        let (lo, hi) = tuning.spawn_timer_reset;
        self.timer = rng.random_range(lo..=hi);
        self.interval = spawn_interval(score, tuning, rng);

        log::debug!(
            "Spawned {:?} at speed {:.2}; next interval {}",
            pattern,
            speed,
            self.interval
        );
        Some(pattern)
    }

    fn spawn<R: Rng + ?Sized>(
        &mut self,
        score: u64,
        speed: f32,
        obstacles: &mut Vec<Obstacle>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> SpawnPattern {
        let pattern = if rng.random_bool(pattern_chance(score, tuning) as f64) {
            if rng.random_bool(0.5) {
                SpawnPattern::Double
            } else {
                SpawnPattern::Staggered
            }
        } else {
            SpawnPattern::Single
        };

        let x = tuning.screen_width;
        self.push(x, speed, obstacles, tuning, rng);

        // Followers never sit closer than the admission distance
        let min_distance = min_spawn_distance(speed, tuning);
        match pattern {
            SpawnPattern::Single => {}
            SpawnPattern::Double => {
                let (lo, hi) = tuning.double_offset;
                let offset = (rng.random_range(lo..=hi) as f32).max(min_distance);
                self.push(x + offset, speed * tuning.double_speed_factor, obstacles, tuning, rng);
            }
            SpawnPattern::Staggered => {
                let (lo, hi) = tuning.staggered_offset;
                let offset = (rng.random_range(lo..=hi) as f32).max(min_distance);
                self.push(x + offset, speed, obstacles, tuning, rng);
            }
        }

        pattern
    }

    fn push<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        speed: f32,
        obstacles: &mut Vec<Obstacle>,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let kind = ObstacleKind::random(rng);
        let id = self.next_id;
        self.next_id += 1;
        obstacles.push(Obstacle::spawn(
            id,
            kind,
            self.size_of(kind),
            x,
            tuning.ground_y,
            speed,
            rng,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn art_sizes() -> [Vec2; ObstacleKind::COUNT] {
        ObstacleKind::ALL.map(ObstacleKind::art_size)
    }

    #[test]
    fn test_first_spawn_waits_for_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = Spawner::new(art_sizes(), &tuning, &mut rng);
        let interval = spawner.interval();
        assert!(interval >= 70);

        let mut obstacles = Vec::new();
        for _ in 0..interval {
            assert!(spawner.update(0, 4.0, &mut obstacles, &tuning, &mut rng).is_none());
        }
        assert!(spawner.update(0, 4.0, &mut obstacles, &tuning, &mut rng).is_some());
        assert!(!obstacles.is_empty());
        assert!(spawner.timer() <= 15);
    }

    #[test]
    fn test_rejected_attempt_keeps_timer() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut spawner = Spawner::new(art_sizes(), &tuning, &mut rng);
        let blocker = Obstacle::spawn(
            99,
            ObstacleKind::Spikes,
            ObstacleKind::Spikes.art_size(),
            tuning.screen_width - 10.0,
            tuning.ground_y,
            4.0,
            &mut rng,
        );
        let mut obstacles = vec![blocker];
        let interval = spawner.interval();
        for _ in 0..interval + 5 {
            assert!(spawner.update(0, 4.0, &mut obstacles, &tuning, &mut rng).is_none());
        }
        assert_eq!(spawner.timer(), interval + 5);

        // Clear the way and the very next tick spawns
        obstacles[0].rect.x = 0.0;
        assert!(spawner.update(0, 4.0, &mut obstacles, &tuning, &mut rng).is_some());
    }

    #[test]
    fn test_pattern_followers_trail_the_leader() {
        let tuning = Tuning {
            pattern_chance_base: 1.0,
            pattern_chance_cap: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(8);
        let mut spawner = Spawner::new(art_sizes(), &tuning, &mut rng);
        for _ in 0..50 {
            let mut obstacles = Vec::new();
            let pattern = spawner.spawn(0, 12.0, &mut obstacles, &tuning, &mut rng);
            assert_eq!(obstacles.len(), pattern.obstacle_count());
            assert_eq!(obstacles.len(), 2);
            let gap = obstacles[1].rect.x - obstacles[0].rect.x;
            assert!(gap >= min_spawn_distance(12.0, &tuning));
            if pattern == SpawnPattern::Double {
                assert!(obstacles[1].speed < 12.0 * 1.05);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_spawns_respect_min_distance(seed in any::<u64>(), score in 0u64..60_000, speed in 4.0f32..16.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = Spawner::new(art_sizes(), &tuning, &mut rng);
            let mut obstacles: Vec<Obstacle> = Vec::new();
            let min_distance = min_spawn_distance(speed, &tuning);

            for _ in 0..600 {
                for o in obstacles.iter_mut() {
                    o.update(tuning.ground_y);
                }
                obstacles.retain(|o| o.rect.right() >= 0.0);

                let before = obstacles.len();
                if spawner.update(score, speed, &mut obstacles, &tuning, &mut rng).is_some() {
                    let (old, new) = obstacles.split_at(before);
                    for (i, fresh) in new.iter().enumerate() {
                        for existing in old.iter().chain(&new[..i]) {
                            prop_assert!(fresh.rect.x - existing.rect.x >= min_distance - 1e-3);
                        }
                    }
                }
            }
        }
    }
}

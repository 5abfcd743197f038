//! Obstacles: grounded hazards scrolling toward the player

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::{HitboxFraction, Rect};

/// Obstacle silhouettes, each with its own collision profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Narrow, tall spike cluster
    Spikes,
    /// Squat broken pillar
    Pillar,
    /// Wide rounded boulder
    Boulder,
}

/// Hitbox fractions indexed by `ObstacleKind::index`
const HITBOX_PROFILES: [HitboxFraction; ObstacleKind::COUNT] = [
    HitboxFraction::new(0.35, 0.65, 0.20, 0.90),
    HitboxFraction::new(0.30, 0.70, 0.25, 0.85),
    HitboxFraction::new(0.25, 0.75, 0.30, 0.80),
];

/// Nominal art sizes, used when the kind's sprite is available
const ART_SIZES: [(f32, f32); ObstacleKind::COUNT] = [(90.0, 80.0), (85.0, 75.0), (80.0, 70.0)];

impl ObstacleKind {
    pub const COUNT: usize = 3;
    pub const ALL: [ObstacleKind; Self::COUNT] =
        [ObstacleKind::Spikes, ObstacleKind::Pillar, ObstacleKind::Boulder];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ObstacleKind::Spikes => 0,
            ObstacleKind::Pillar => 1,
            ObstacleKind::Boulder => 2,
        }
    }

    /// Collision profile relative to the full box
    #[inline]
    pub fn hitbox(self) -> &'static HitboxFraction {
        &HITBOX_PROFILES[self.index()]
    }

    pub fn art_size(self) -> Vec2 {
        let (w, h) = ART_SIZES[self.index()];
        Vec2::new(w, h)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Spikes => "spikes",
            ObstacleKind::Pillar => "pillar",
            ObstacleKind::Boulder => "boulder",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::COUNT)]
    }
}

/// Cosmetic vertical bob of the obstacle body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bob {
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
    pub time: f32,
}

impl Bob {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            amplitude: rng.random_range(0..=3) as f32,
            speed: rng.random_range(0.03..=0.08),
            phase: rng.random_range(0.0..=std::f32::consts::TAU),
            time: rng.random_range(0.0..10.0),
        }
    }

    /// Current body offset; the ground contact is unaffected
    #[inline]
    pub fn offset(&self) -> f32 {
        (self.time + self.phase).sin() * self.amplitude
    }
}

/// A single hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Pixels per tick, fixed at spawn
    pub speed: f32,
    pub bob: Bob,
}

impl Obstacle {
    /// New obstacle with its left edge at `x`, standing on the ground.
    /// `base_speed` gets a ±5% per-instance jitter.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: ObstacleKind,
        size: Vec2,
        x: f32,
        ground_y: f32,
        base_speed: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            kind,
            rect: Rect::on_ground(x, ground_y, size),
            speed: base_speed * rng.random_range(0.95..=1.05),
            bob: Bob::random(rng),
        }
    }

    /// Scroll left and bob. Returns false once fully past the left edge.
    pub fn update(&mut self, ground_y: f32) -> bool {
        self.rect.x -= self.speed;
        if self.bob.amplitude > 0.0 {
            self.bob.time += self.bob.speed;
        }
        self.rect.set_bottom(ground_y);
        self.rect.right() >= 0.0
    }

    /// Reduced collision box
    #[inline]
    pub fn hitbox(&self) -> Rect {
        self.rect.fraction(self.kind.hitbox())
    }

    #[inline]
    pub fn bob_offset(&self) -> f32 {
        self.bob.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_profiles_are_distinct() {
        for (i, a) in ObstacleKind::ALL.iter().enumerate() {
            for b in &ObstacleKind::ALL[i + 1..] {
                assert_ne!(a.hitbox(), b.hitbox());
            }
        }
    }

    #[test]
    fn test_speed_jitter_within_five_percent() {
        let mut rng = Pcg32::seed_from_u64(42);
        for i in 0..200 {
            let kind = ObstacleKind::random(&mut rng);
            let o = Obstacle::spawn(i, kind, kind.art_size(), 1024.0, 560.0, 8.0, &mut rng);
            assert!(o.speed >= 8.0 * 0.95 - 1e-4 && o.speed <= 8.0 * 1.05 + 1e-4);
            assert!(o.bob.amplitude >= 0.0 && o.bob.amplitude <= 3.0);
        }
    }

    #[test]
    fn test_update_pins_bottom_and_culls() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut o = Obstacle::spawn(
            1,
            ObstacleKind::Pillar,
            ObstacleKind::Pillar.art_size(),
            10.0,
            560.0,
            20.0,
            &mut rng,
        );
        o.bob.amplitude = 3.0;
        let mut alive = true;
        let mut ticks = 0;
        while alive {
            alive = o.update(560.0);
            assert_eq!(o.rect.bottom(), 560.0);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(o.rect.right() < 0.0);
    }
}

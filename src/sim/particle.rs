//! Particle sets for debris, dust and destruction sparks
//!
//! One particle list holds every variant; the kind discriminant decides how a
//! particle ages and how it is drawn. `Particle::step` returns liveness and
//! callers drop particles for which it returns false.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// RGB color (alpha is tracked separately as a fade accumulator)
pub type Rgb = [u8; 3];

/// Fiery palette for obstacle destruction sparks
pub const EMBER_PALETTE: [Rgb; 3] = [[255, 100, 0], [255, 50, 0], [200, 0, 0]];

/// Outline of a debris fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FragmentShape {
    /// Square of side `size`, centred on the particle
    Rect,
    /// Convex polygon; offsets are relative to the centre at the spawn size
    Polygon { points: Vec<Vec2> },
}

/// Variant-specific particle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Rotating debris chunk that fades and shrinks
    Fragment {
        /// Degrees
        rotation: f32,
        /// Degrees per tick
        rotation_speed: f32,
        shrink: f32,
        original_size: f32,
        shape: FragmentShape,
    },
    /// Dust mote with a fixed lifetime
    Dust { lifetime: u32 },
    /// Short-lived spark from a destroyed obstacle
    Ember { lifetime: u32 },
}

/// A single simulated visual body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub size: f32,
    pub color: Rgb,
    /// 0-255 fade accumulator
    pub alpha: f32,
    /// Alpha lost per tick
    pub fade: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Debris chunk with a random outline, spin and fade rate
    pub fn fragment<R: Rng + ?Sized>(
        pos: Vec2,
        size: f32,
        color: Rgb,
        vel: Vec2,
        shrink: f32,
        rng: &mut R,
    ) -> Self {
        let shape = if rng.random_bool(0.5) {
            FragmentShape::Rect
        } else {
            let count = rng.random_range(3..=6);
            let points = (0..count)
                .map(|i| {
                    let angle = std::f32::consts::TAU * i as f32 / count as f32;
                    let dist = size * rng.random_range(0.5..=1.0);
                    Vec2::new(angle.cos() * dist, angle.sin() * dist)
                })
                .collect();
            FragmentShape::Polygon { points }
        };

        Self {
            pos,
            vel,
            gravity: rng.random_range(0.2..=0.4),
            size,
            color,
            alpha: 255.0,
            fade: rng.random_range(2.0..=5.0),
            kind: ParticleKind::Fragment {
                rotation: rng.random_range(0.0..=360.0),
                rotation_speed: rng.random_range(-5.0..=5.0),
                shrink,
                original_size: size,
                shape,
            },
        }
    }

    /// Dust mote; its alpha reaches zero together with its lifetime
    pub fn dust<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let lifetime: u32 = rng.random_range(30..=90);
        let alpha = rng.random_range(150..=255) as f32;
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-3.0..=-0.5)),
            gravity: rng.random_range(0.05..=0.1),
            size: rng.random_range(1.0..=3.0),
            color: [
                rng.random_range(100..=150),
                rng.random_range(80..=120),
                rng.random_range(60..=100),
            ],
            alpha,
            fade: alpha / lifetime as f32,
            kind: ParticleKind::Dust { lifetime },
        }
    }

    /// Upward-biased spark, opaque until its lifetime runs out
    pub fn ember<R: Rng + ?Sized>(pos: Vec2, max_lifetime: u32, rng: &mut R) -> Self {
        let min_lifetime = (max_lifetime / 2).max(1);
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..=3.0), rng.random_range(-6.0..=-1.0)),
            gravity: 0.2,
            size: rng.random_range(3..=8) as f32,
            color: EMBER_PALETTE[rng.random_range(0..EMBER_PALETTE.len())],
            alpha: 255.0,
            fade: 0.0,
            kind: ParticleKind::Ember {
                lifetime: rng.random_range(min_lifetime..=max_lifetime.max(min_lifetime)),
            },
        }
    }

    /// Liveness: visible and not expired
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
            && match self.kind {
                ParticleKind::Fragment { .. } => self.size > 0.0,
                ParticleKind::Dust { lifetime } | ParticleKind::Ember { lifetime } => lifetime > 0,
            }
    }

    /// Advance one tick. Returns liveness; a dead particle never revives.
    pub fn step(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.alpha = (self.alpha - self.fade).max(0.0);

        match &mut self.kind {
            ParticleKind::Fragment {
                rotation,
                rotation_speed,
                shrink,
                ..
            } => {
                *rotation += *rotation_speed;
                self.size = (self.size - *shrink).max(0.0);
            }
            ParticleKind::Dust { lifetime } | ParticleKind::Ember { lifetime } => {
                *lifetime = lifetime.saturating_sub(1);
            }
        }

        self.is_alive()
    }

    /// Rotation in degrees (0 for unrotated variants)
    pub fn rotation(&self) -> f32 {
        match self.kind {
            ParticleKind::Fragment { rotation, .. } => rotation,
            _ => 0.0,
        }
    }

    /// Polygon outline scaled to the current size, relative to `pos`
    pub fn outline(&self) -> Option<Vec<Vec2>> {
        match &self.kind {
            ParticleKind::Fragment {
                original_size,
                shape: FragmentShape::Polygon { points },
                ..
            } => {
                let scale = if *original_size > 0.0 {
                    self.size / original_size
                } else {
                    0.0
                };
                Some(points.iter().map(|p| *p * scale).collect())
            }
            _ => None,
        }
    }
}

/// Size class for shattering the petrified player
#[derive(Debug, Clone, Copy)]
pub struct FragmentTier {
    pub count: usize,
    pub size: (i32, i32),
    pub speed_x: f32,
    pub speed_y: f32,
    /// Per-channel inclusive ranges; smaller tiers are darker
    pub color: [(u8, u8); 3],
}

/// Large, medium and small debris tiers
pub const FRAGMENT_TIERS: [FragmentTier; 3] = [
    FragmentTier {
        count: 10,
        size: (5, 15),
        speed_x: 3.0,
        speed_y: 8.0,
        color: [(120, 180), (100, 160), (80, 140)],
    },
    FragmentTier {
        count: 20,
        size: (3, 8),
        speed_x: 2.0,
        speed_y: 6.0,
        color: [(100, 160), (80, 140), (60, 120)],
    },
    FragmentTier {
        count: 30,
        size: (1, 4),
        speed_x: 1.0,
        speed_y: 4.0,
        color: [(80, 140), (60, 120), (40, 100)],
    },
];

/// A dynamically sized collection of independently simulated particles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destruction burst of embers at `center`
    pub fn burst<R: Rng + ?Sized>(center: Vec2, count: usize, max_lifetime: u32, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle::ember(center, max_lifetime, rng))
            .collect();
        Self { particles }
    }

    /// Break `area` into tiered fragments thrown outward and upward
    pub fn shatter<R: Rng + ?Sized>(&mut self, area: &Rect, shrink: f32, rng: &mut R) {
        for tier in &FRAGMENT_TIERS {
            for _ in 0..tier.count {
                let size = rng.random_range(tier.size.0..=tier.size.1) as f32;
                let pos = area.point_at(rng.random_range(0.0..=1.0), rng.random_range(0.0..=1.0));
                let color = [
                    rng.random_range(tier.color[0].0..=tier.color[0].1),
                    rng.random_range(tier.color[1].0..=tier.color[1].1),
                    rng.random_range(tier.color[2].0..=tier.color[2].1),
                ];
                let vel = Vec2::new(
                    rng.random_range(-tier.speed_x..=tier.speed_x),
                    rng.random_range(-tier.speed_y..=0.0),
                );
                self.particles
                    .push(Particle::fragment(pos, size, color, vel, shrink, rng));
            }
        }
    }

    /// 1-3 dust motes at `pos`
    pub fn puff<R: Rng + ?Sized>(&mut self, pos: Vec2, rng: &mut R) {
        let count = rng.random_range(1..=3);
        for _ in 0..count {
            self.particles.push(Particle::dust(pos, rng));
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Advance every particle and drop the dead ones
    pub fn step(&mut self) {
        self.particles.retain_mut(Particle::step);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of live fragments (dust and sparks excluded)
    pub fn fragment_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Fragment { .. }))
            .count()
    }
}

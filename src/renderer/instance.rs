//! GPU-ready instance types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Particle;

/// One particle as an instanced quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    /// Straight-alpha RGBA, 0-1
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(particle: &Particle) -> Self {
        let [r, g, b] = particle.color;
        Self {
            position: particle.pos.to_array(),
            size: particle.size,
            rotation: particle.rotation(),
            color: [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                (particle.alpha / 255.0).clamp(0.0, 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        let instances = [ParticleInstance::zeroed(); 4];
        assert_eq!(bytemuck::cast_slice::<_, u8>(&instances).len(), 128);
    }

    #[test]
    fn test_from_particle() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p = Particle::ember(Vec2::new(3.0, 4.0), 30, &mut rng);
        let inst = ParticleInstance::from_particle(&p);
        assert_eq!(inst.position, [3.0, 4.0]);
        assert_eq!(inst.color[3], 1.0);
        assert_eq!(inst.rotation, 0.0);
    }
}

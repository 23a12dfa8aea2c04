//! Falling particles: shimmering motes drifting down over the whole scene.

use super::{Particle, ParticleBehavior};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Spawn area and fall rules for falling particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingParticles {
    /// Side length of the square spawn area, centered on the origin
    pub spread: f32,
    /// Spawn height range
    pub spawn_height: (f32, f32),
    /// Particles below this height respawn
    pub floor: f32,
    /// Phase advance per update
    pub phase_step: f32,
}

impl Default for FallingParticles {
    fn default() -> Self {
        Self {
            spread: 100.0,
            spawn_height: (50.0, 70.0),
            floor: -10.0,
            phase_step: 0.1,
        }
    }
}

impl FallingParticles {
    /// Shimmer modulated by a slower on/off blink.
    pub fn opacity(phase: f32) -> f32 {
        let shimmer = 0.5 + 0.5 * phase.sin();
        let blink = if (phase * 0.5).sin() > 0.3 { 1.0 } else { 0.3 };
        shimmer * blink
    }
}

impl ParticleBehavior for FallingParticles {
    const NAME: &'static str = "falling";

    fn spawn(&self, rng: &mut StdRng) -> Particle {
        let half = self.spread * 0.5;
        let phase = rng.gen_range(0.0..TAU);
        Particle {
            position: Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(self.spawn_height.0..=self.spawn_height.1),
                rng.gen_range(-half..=half),
            ),
            velocity: Vec3::new(
                rng.gen_range(-0.05..=0.05),
                -rng.gen_range(0.2..=0.5),
                rng.gen_range(-0.05..=0.05),
            ),
            phase,
            opacity: Self::opacity(phase),
            size: 0.05,
        }
    }

    fn step(&self, particle: &mut Particle, _rng: &mut StdRng) -> bool {
        particle.position += particle.velocity;
        particle.phase += self.phase_step;
        particle.opacity = Self::opacity(particle.phase);
        particle.position.y >= self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ParticlePool;
    use folio3d_core::scoped_rng;

    #[test]
    fn spawns_inside_the_area_and_falls() {
        let behavior = FallingParticles::default();
        let mut rng = scoped_rng(3, 0);
        for _ in 0..200 {
            let p = behavior.spawn(&mut rng);
            assert!(p.position.x.abs() <= 50.0 && p.position.z.abs() <= 50.0);
            assert!((50.0..=70.0).contains(&p.position.y));
            assert!((-0.5..=-0.2).contains(&p.velocity.y));
        }
    }

    #[test]
    fn opacity_stays_in_unit_range() {
        for i in 0..1000 {
            let o = FallingParticles::opacity(i as f32 * 0.037);
            assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn particles_respawn_after_crossing_the_floor() {
        let mut pool = ParticlePool::new(FallingParticles::default(), 20, scoped_rng(3, 1));
        // Slowest fall is 0.2 units per update from at most 70 units up
        for _ in 0..500 {
            pool.update();
        }
        assert_eq!(pool.len(), 20);
        assert!(pool.respawn_count() >= 20);
        assert!(pool.particles().iter().all(|p| p.position.y >= -10.0));
    }
}

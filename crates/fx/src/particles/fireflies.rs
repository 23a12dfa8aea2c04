//! Fireflies: slow, pulsing lights hovering around the model.

use super::{Particle, ParticleBehavior};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Hover volume and steering rules for fireflies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fireflies {
    /// Point the swarm stays around
    pub center: Vec3,
    /// Half-extent of the horizontal spawn area
    pub spawn_radius: f32,
    /// Spawn height range
    pub spawn_height: (f32, f32),
    /// Beyond this distance from `center`, velocity is pulled back
    pub leash: f32,
    /// Velocity added per update toward `center` when off the leash
    pub pull: f32,
    /// Chance per update of reversing direction
    pub reverse_chance: f64,
    /// Particles below this height respawn
    pub floor: f32,
    pub phase_step: f32,
}

impl Default for Fireflies {
    fn default() -> Self {
        Self {
            center: Vec3::new(10.5, 9.0, 10.0),
            spawn_radius: 10.0,
            spawn_height: (5.0, 15.0),
            leash: 15.0,
            pull: 0.001,
            reverse_chance: 0.02,
            floor: -5.0,
            phase_step: 0.05,
        }
    }
}

impl Fireflies {
    /// Pulse between 0.3 and 1.0.
    pub fn intensity(phase: f32) -> f32 {
        0.3 + 0.7 * phase.sin().abs()
    }

    /// Point-light strength for a firefly at `opacity`.
    pub fn light_intensity(opacity: f32) -> f32 {
        opacity * 2.0
    }
}

impl ParticleBehavior for Fireflies {
    const NAME: &'static str = "fireflies";

    fn spawn(&self, rng: &mut StdRng) -> Particle {
        let r = self.spawn_radius;
        let phase = rng.gen_range(0.0..TAU);
        Particle {
            position: Vec3::new(
                self.center.x + rng.gen_range(-r..=r),
                rng.gen_range(self.spawn_height.0..=self.spawn_height.1),
                self.center.z + rng.gen_range(-r..=r),
            ),
            velocity: Vec3::new(
                rng.gen_range(-0.01..=0.01),
                rng.gen_range(-0.005..=0.005),
                rng.gen_range(-0.01..=0.01),
            ),
            phase,
            opacity: Self::intensity(phase),
            size: 0.08,
        }
    }

    fn step(&self, particle: &mut Particle, rng: &mut StdRng) -> bool {
        particle.position += particle.velocity;

        let offset = self.center - particle.position;
        if offset.length() > self.leash {
            particle.velocity += offset.normalize_or_zero() * self.pull;
        }
        if rng.gen_bool(self.reverse_chance.clamp(0.0, 1.0)) {
            particle.velocity = -particle.velocity;
        }

        particle.phase += self.phase_step;
        particle.opacity = Self::intensity(particle.phase);
        particle.position.y >= self.floor
    }
}

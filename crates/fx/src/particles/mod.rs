//! Particle subsystems.
//!
//! Every subsystem is a fixed-size [`ParticlePool`] driven by a
//! [`ParticleBehavior`]. Instances that leave their volume are respawned in
//! place; the pool never allocates during updates.

pub mod falling;
pub mod fireflies;
pub mod petals;

pub use falling::FallingParticles;
pub use fireflies::Fireflies;
pub use petals::Petals;

use glam::Vec3;
use rand::rngs::StdRng;
use tracing::debug;

/// One simulated instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Displacement per update
    pub velocity: Vec3,
    /// Phase accumulator driving the opacity oscillation
    pub phase: f32,
    pub opacity: f32,
    pub size: f32,
}

/// Spawn and integration rules for one kind of particle.
pub trait ParticleBehavior {
    /// Label used in logs.
    const NAME: &'static str;

    /// Fresh, randomized spawn state.
    fn spawn(&self, rng: &mut StdRng) -> Particle;

    /// Advance one update. Returns `false` once the particle has left its volume.
    fn step(&self, particle: &mut Particle, rng: &mut StdRng) -> bool;
}

/// Fixed-size pool of particles sharing one behavior.
#[derive(Debug, Clone)]
pub struct ParticlePool<B> {
    behavior: B,
    particles: Vec<Particle>,
    rng: StdRng,
    respawns: u64,
}

impl<B: ParticleBehavior> ParticlePool<B> {
    pub fn new(behavior: B, count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count).map(|_| behavior.spawn(&mut rng)).collect();
        Self {
            behavior,
            particles,
            rng,
            respawns: 0,
        }
    }

    /// Step every particle, respawning any that left their volume.
    ///
    /// A respawned particle keeps its phase so its oscillation stays continuous.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            if !self.behavior.step(particle, &mut self.rng) {
                let phase = particle.phase;
                *particle = self.behavior.spawn(&mut self.rng);
                particle.phase = phase;
                self.respawns += 1;
            }
        }
    }

    /// Shrink the pool to at most `max` particles. Pools never grow.
    pub fn truncate(&mut self, max: usize) {
        if max < self.particles.len() {
            debug!(
                subsystem = B::NAME,
                from = self.particles.len(),
                to = max,
                "truncating particle pool"
            );
            self.particles.truncate(max);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total respawns since creation.
    pub fn respawn_count(&self) -> u64 {
        self.respawns
    }
}

//! Screen-space petals drifting over the loading screen and scene.
//!
//! Coordinates are in percent of the viewport with `y` growing downward, so
//! a petal falls from `y <= 0` to past `y = 100`.

use super::{Particle, ParticleBehavior};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Fall timing and look of the petals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Petals {
    /// Seconds to cross the screen, sampled per petal
    pub fall_time: (f32, f32),
    /// Extra start delay in seconds, turned into a start height above the top edge
    pub start_delay: (f32, f32),
    /// Size range in pixels
    pub size: (f32, f32),
    /// Updates per second the fall speed is calibrated for
    pub update_rate: f32,
    /// Horizontal sway amplitude per update
    pub sway: f32,
    pub phase_step: f32,
}

impl Default for Petals {
    fn default() -> Self {
        Self {
            fall_time: (4.0, 7.0),
            start_delay: (0.0, 2.0),
            size: (8.0, 16.0),
            update_rate: 60.0,
            sway: 0.05,
            phase_step: 0.05,
        }
    }
}

/// Screen extent in percent.
const SCREEN: f32 = 100.0;

impl Petals {
    /// Gentle flutter between 0.5 and 1.0.
    pub fn opacity(phase: f32) -> f32 {
        0.75 + 0.25 * phase.cos()
    }
}

impl ParticleBehavior for Petals {
    const NAME: &'static str = "petals";

    fn spawn(&self, rng: &mut StdRng) -> Particle {
        let fall_time = rng.gen_range(self.fall_time.0..=self.fall_time.1);
        let delay = rng.gen_range(self.start_delay.0..=self.start_delay.1);
        let speed = SCREEN / (fall_time * self.update_rate).max(1.0);
        let phase = rng.gen_range(0.0..TAU);
        Particle {
            position: Vec3::new(
                rng.gen_range(0.0..=SCREEN),
                -delay * self.update_rate * speed,
                0.0,
            ),
            velocity: Vec3::new(0.0, speed, 0.0),
            phase,
            opacity: Self::opacity(phase),
            size: rng.gen_range(self.size.0..=self.size.1),
        }
    }

    fn step(&self, particle: &mut Particle, _rng: &mut StdRng) -> bool {
        particle.position.y += particle.velocity.y;
        particle.position.x += particle.phase.sin() * self.sway;
        particle.phase += self.phase_step;
        particle.opacity = Self::opacity(particle.phase);
        particle.position.y <= SCREEN
    }
}

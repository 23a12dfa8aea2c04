//! All particle subsystems of a scene, updated on the quality cadence.

use crate::particles::{FallingParticles, Fireflies, ParticlePool, Petals};
use crate::quality::ParticleBudget;
use folio3d_core::{scoped_rng, FrameTick};
use serde::Serialize;
use tracing::debug;

const FALLING_STREAM: u64 = 1;
const FIREFLY_STREAM: u64 = 2;
const PETAL_STREAM: u64 = 3;

/// Live particle counts, for traces and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ParticleCounts {
    pub falling: usize,
    pub fireflies: usize,
    pub petals: usize,
}

/// Falling particles, fireflies and petals sized from one budget.
#[derive(Debug, Clone)]
pub struct ParticleField {
    falling: ParticlePool<FallingParticles>,
    fireflies: ParticlePool<Fireflies>,
    petals: ParticlePool<Petals>,
    update_interval: u32,
    tick: FrameTick,
    updates: u64,
}

impl ParticleField {
    /// Fill every pool to its cap. Each pool draws from its own seeded stream.
    pub fn new(budget: ParticleBudget, seed: u64) -> Self {
        Self {
            falling: ParticlePool::new(
                FallingParticles::default(),
                budget.falling,
                scoped_rng(seed, FALLING_STREAM),
            ),
            fireflies: ParticlePool::new(
                Fireflies::default(),
                budget.fireflies,
                scoped_rng(seed, FIREFLY_STREAM),
            ),
            petals: ParticlePool::new(
                Petals::default(),
                budget.petals,
                scoped_rng(seed, PETAL_STREAM),
            ),
            update_interval: budget.update_interval,
            tick: FrameTick::ZERO,
            updates: 0,
        }
    }

    /// Called once per frame; steps the pools only on cadence ticks.
    ///
    /// Returns whether the particles were updated this frame.
    pub fn tick(&mut self) -> bool {
        let due = self.tick.on_cadence(self.update_interval);
        self.tick = self.tick.advance(1);
        if due {
            self.falling.update();
            self.fireflies.update();
            self.petals.update();
            self.updates += 1;
        }
        due
    }

    /// Shrink pools and slow the cadence to a reduced budget.
    pub fn apply_budget(&mut self, budget: ParticleBudget) {
        self.falling.truncate(budget.falling);
        self.fireflies.truncate(budget.fireflies);
        self.petals.truncate(budget.petals);
        self.update_interval = self.update_interval.max(budget.update_interval);
        debug!(
            counts = ?self.counts(),
            interval = self.update_interval,
            "particle budget applied"
        );
    }

    pub fn counts(&self) -> ParticleCounts {
        ParticleCounts {
            falling: self.falling.len(),
            fireflies: self.fireflies.len(),
            petals: self.petals.len(),
        }
    }

    pub fn update_interval(&self) -> u32 {
        self.update_interval
    }

    /// Number of frames on which the pools were stepped.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    pub fn falling(&self) -> &ParticlePool<FallingParticles> {
        &self.falling
    }

    pub fn fireflies(&self) -> &ParticlePool<Fireflies> {
        &self.fireflies
    }

    pub fn petals(&self) -> &ParticlePool<Petals> {
        &self.petals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityProfile;

    #[test]
    fn low_profile_updates_every_third_frame() {
        let mut field = ParticleField::new(QualityProfile::Low.budget(), 11);
        let updated: Vec<bool> = (0..7).map(|_| field.tick()).collect();
        assert_eq!(updated, vec![true, false, false, true, false, false, true]);
        assert_eq!(field.update_count(), 3);
    }

    #[test]
    fn pools_start_at_their_caps() {
        let field = ParticleField::new(QualityProfile::Medium.budget(), 11);
        assert_eq!(
            field.counts(),
            ParticleCounts {
                falling: 35,
                fireflies: 10,
                petals: 20
            }
        );
    }

    #[test]
    fn reduced_budget_truncates_and_never_speeds_up() {
        let mut field = ParticleField::new(QualityProfile::High.budget(), 11);
        field.apply_budget(QualityProfile::Low.budget());
        assert_eq!(field.counts().falling, 20);
        assert_eq!(field.update_interval(), 3);

        field.apply_budget(QualityProfile::High.budget());
        assert_eq!(field.counts().falling, 20);
        assert_eq!(field.update_interval(), 3);
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = ParticleField::new(QualityProfile::High.budget(), 42);
        let mut b = ParticleField::new(QualityProfile::High.budget(), 42);
        for _ in 0..30 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.falling().particles(), b.falling().particles());
        assert_eq!(a.fireflies().particles(), b.fireflies().particles());
    }
}

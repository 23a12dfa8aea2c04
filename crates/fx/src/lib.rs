//! Decorative effects for folio3d scenes.
//!
//! The [`AdaptiveQuality`] controller picks a particle budget from device
//! signals and lowers it when the frame rate stays under a floor. The
//! [`ParticleField`] simulates falling particles, fireflies and petals within
//! that budget. Nothing here reads or writes interaction state.

pub mod adaptive;
pub mod field;
pub mod monitor;
pub mod particles;
pub mod quality;

// Re-export commonly used types
pub use adaptive::{AdaptiveQuality, QualitySettings, QualityShed};
pub use field::{ParticleCounts, ParticleField};
pub use monitor::FrameRateMonitor;
pub use particles::{FallingParticles, Fireflies, Particle, ParticleBehavior, ParticlePool, Petals};
pub use quality::{classify_device, DeviceSignals, ParticleBudget, QualityProfile, NARROW_VIEWPORT_WIDTH};

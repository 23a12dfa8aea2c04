//! Adaptive quality controller.
//!
//! Classifies the device once, then watches frame rate. Every sample window
//! whose average falls below the floor drops the profile one tier and shrinks
//! the particle budget. Nothing ever raises it again within a session.

use crate::monitor::FrameRateMonitor;
use crate::quality::{classify_device, DeviceSignals, ParticleBudget, QualityProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tunables for the controller (`[quality]` in the scene config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    /// Average FPS below which a window sheds load
    pub fps_floor: f32,
    /// Sample window in seconds
    pub sample_window: f32,
    /// Skip device classification and start at this profile
    pub forced_profile: Option<QualityProfile>,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            fps_floor: 30.0,
            sample_window: 1.0,
            forced_profile: None,
        }
    }
}

/// One irreversible downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityShed {
    pub from: QualityProfile,
    pub to: QualityProfile,
    /// Average FPS of the window that triggered it
    pub fps: f32,
    pub budget: ParticleBudget,
}

/// Owns the session's quality profile and particle budget.
#[derive(Debug, Clone)]
pub struct AdaptiveQuality {
    initial: QualityProfile,
    profile: QualityProfile,
    budget: ParticleBudget,
    viewport_width: Option<u32>,
    fps_floor: f32,
    monitor: FrameRateMonitor,
    sheds: u32,
}

impl AdaptiveQuality {
    /// Classify the device and size the initial budget.
    pub fn new(signals: &DeviceSignals, settings: &QualitySettings) -> Self {
        let profile = settings
            .forced_profile
            .unwrap_or_else(|| classify_device(signals));
        let budget = profile.budget().clamp_to_viewport(signals.viewport_width);
        info!(
            %profile,
            forced = settings.forced_profile.is_some(),
            falling = budget.falling,
            fireflies = budget.fireflies,
            petals = budget.petals,
            interval = budget.update_interval,
            "quality profile selected"
        );

        Self {
            initial: profile,
            profile,
            budget,
            viewport_width: signals.viewport_width,
            fps_floor: settings.fps_floor,
            monitor: FrameRateMonitor::new(settings.sample_window),
            sheds: 0,
        }
    }

    pub fn profile(&self) -> QualityProfile {
        self.profile
    }

    /// Profile chosen at startup.
    pub fn initial_profile(&self) -> QualityProfile {
        self.initial
    }

    pub fn budget(&self) -> ParticleBudget {
        self.budget
    }

    /// Number of downgrades so far.
    pub fn shed_count(&self) -> u32 {
        self.sheds
    }

    pub fn last_fps(&self) -> Option<f32> {
        self.monitor.last_fps()
    }

    /// Record one frame; returns a shed when a slow window forces a downgrade.
    pub fn record_frame(&mut self, dt: f32) -> Option<QualityShed> {
        let fps = self.monitor.record(dt)?;
        if fps >= self.fps_floor {
            return None;
        }

        let Some(next) = self.profile.downgrade() else {
            debug!(fps, "frame rate below floor at lowest profile");
            return None;
        };

        let from = self.profile;
        self.profile = next;
        self.budget = shrink(self.budget, next.budget().clamp_to_viewport(self.viewport_width));
        self.sheds += 1;
        info!(%from, to = %next, fps, "frame rate below floor; shedding particles");

        Some(QualityShed {
            from,
            to: next,
            fps,
            budget: self.budget,
        })
    }
}

/// Element-wise tighter of two budgets, so a shed never grows anything.
fn shrink(current: ParticleBudget, target: ParticleBudget) -> ParticleBudget {
    ParticleBudget {
        falling: current.falling.min(target.falling),
        fireflies: current.fireflies.min(target.fireflies),
        petals: current.petals.min(target.petals),
        update_interval: current.update_interval.max(target.update_interval),
    }
}

//! Quality profiles and device classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewports narrower than this get the narrow-screen clamp.
pub const NARROW_VIEWPORT_WIDTH: u32 = 768;

/// Renderer substrings identifying integrated or mobile GPUs.
const INTEGRATED_GPU_MARKERS: [&str; 3] = ["Intel", "Mali", "Adreno"];

/// User-agent substrings identifying mobile devices.
const MOBILE_UA_MARKERS: [&str; 4] = ["Mobile", "Android", "iPhone", "iPad"];

/// Rendering quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityProfile {
    Low,
    Medium,
    High,
}

impl QualityProfile {
    /// Particle caps and update cadence for this tier.
    pub const fn budget(self) -> ParticleBudget {
        match self {
            QualityProfile::Low => ParticleBudget {
                falling: 20,
                fireflies: 5,
                petals: 12,
                update_interval: 3,
            },
            QualityProfile::Medium => ParticleBudget {
                falling: 35,
                fireflies: 10,
                petals: 20,
                update_interval: 2,
            },
            QualityProfile::High => ParticleBudget {
                falling: 50,
                fireflies: 15,
                petals: 30,
                update_interval: 1,
            },
        }
    }

    /// Next tier down, or `None` at `Low`.
    pub const fn downgrade(self) -> Option<Self> {
        match self {
            QualityProfile::High => Some(QualityProfile::Medium),
            QualityProfile::Medium => Some(QualityProfile::Low),
            QualityProfile::Low => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            QualityProfile::Low => "low",
            QualityProfile::Medium => "medium",
            QualityProfile::High => "high",
        }
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum particle counts per subsystem plus the update cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleBudget {
    pub falling: usize,
    pub fireflies: usize,
    pub petals: usize,
    /// Particles update every `update_interval` frames
    pub update_interval: u32,
}

impl ParticleBudget {
    /// Cap falling particles and fireflies further on narrow viewports.
    pub fn clamp_to_viewport(self, viewport_width: Option<u32>) -> Self {
        match viewport_width {
            Some(width) if width < NARROW_VIEWPORT_WIDTH => Self {
                falling: self.falling.min(30),
                fireflies: self.fireflies.min(8),
                ..self
            },
            _ => self,
        }
    }
}

/// Signals used to classify a device once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSignals {
    pub user_agent: String,
    /// Unmasked renderer string, when the driver exposes one
    pub gpu_renderer: Option<String>,
    /// Whether a graphics context could be created at all
    pub graphics_available: bool,
    pub viewport_width: Option<u32>,
}

impl Default for DeviceSignals {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            gpu_renderer: None,
            graphics_available: true,
            viewport_width: None,
        }
    }
}

/// Pick a profile from device signals, checked in order.
///
/// No graphics context means `Low`; so does a mobile user agent. A known
/// integrated GPU means `Medium`. Everything else is `High`.
pub fn classify_device(signals: &DeviceSignals) -> QualityProfile {
    if !signals.graphics_available {
        return QualityProfile::Low;
    }
    if MOBILE_UA_MARKERS
        .iter()
        .any(|marker| signals.user_agent.contains(marker))
    {
        return QualityProfile::Low;
    }
    let renderer = signals.gpu_renderer.as_deref().unwrap_or_default();
    if INTEGRATED_GPU_MARKERS
        .iter()
        .any(|marker| renderer.contains(marker))
    {
        return QualityProfile::Medium;
    }
    QualityProfile::High
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(user_agent: &str, renderer: Option<&str>) -> DeviceSignals {
        DeviceSignals {
            user_agent: user_agent.to_string(),
            gpu_renderer: renderer.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn signals_are_checked_in_order() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        assert_eq!(
            classify_device(&signals(iphone, Some("Apple GPU"))),
            QualityProfile::Low
        );
        // Mobile wins over an integrated renderer
        assert_eq!(
            classify_device(&signals("Linux; Android 14", Some("Adreno (TM) 740"))),
            QualityProfile::Low
        );
        assert_eq!(
            classify_device(&signals("X11; Linux x86_64", Some("Mesa Intel(R) UHD 620"))),
            QualityProfile::Medium
        );
        assert_eq!(
            classify_device(&signals("Windows NT 10.0", Some("NVIDIA GeForce RTX 4070"))),
            QualityProfile::High
        );
        assert_eq!(classify_device(&signals("Windows NT 10.0", None)), QualityProfile::High);
    }

    #[test]
    fn missing_graphics_is_low() {
        let probe = DeviceSignals {
            graphics_available: false,
            ..signals("Windows NT 10.0", Some("NVIDIA"))
        };
        assert_eq!(classify_device(&probe), QualityProfile::Low);
    }

    #[test]
    fn downgrade_stops_at_low() {
        assert_eq!(QualityProfile::High.downgrade(), Some(QualityProfile::Medium));
        assert_eq!(QualityProfile::Medium.downgrade(), Some(QualityProfile::Low));
        assert_eq!(QualityProfile::Low.downgrade(), None);
    }

    #[test]
    fn narrow_viewport_takes_the_tighter_cap() {
        let high = QualityProfile::High.budget().clamp_to_viewport(Some(375));
        assert_eq!((high.falling, high.fireflies, high.petals), (30, 8, 30));

        let low = QualityProfile::Low.budget().clamp_to_viewport(Some(375));
        assert_eq!(low, QualityProfile::Low.budget());

        let wide = QualityProfile::High.budget().clamp_to_viewport(Some(1920));
        assert_eq!(wide, QualityProfile::High.budget());
    }
}

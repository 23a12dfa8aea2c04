//! Overlay identifiers.
//!
//! Overlays are the modal panels shown on top of the scene. The set is closed:
//! presentation code owns the markup, the interaction layer only ever names one
//! of these identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier for a modal overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayId {
    /// "About me" panel.
    About,
    /// Project showcase panel.
    Projects,
    /// Work experience panel.
    Work,
    /// Contact details panel.
    Contact,
    /// Landing panel; also the fallback for unrecognized entities.
    Main,
}

/// Error returned when parsing an unknown overlay identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown overlay identifier {0:?}")]
pub struct ParseOverlayIdError(pub String);

impl OverlayId {
    /// All overlays in declaration order.
    pub const ALL: [OverlayId; 5] = [
        OverlayId::About,
        OverlayId::Projects,
        OverlayId::Work,
        OverlayId::Contact,
        OverlayId::Main,
    ];

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::Work => "work",
            Self::Contact => "contact",
            Self::Main => "main",
        }
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::Main
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayId {
    type Err = ParseOverlayIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        OverlayId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| ParseOverlayIdError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_keys_round_trip_through_from_str() {
        for id in OverlayId::ALL {
            assert_eq!(id.as_str().parse::<OverlayId>(), Ok(id));
        }
        assert_eq!(" Projects ".parse::<OverlayId>(), Ok(OverlayId::Projects));
    }

    #[test]
    fn unknown_overlay_is_rejected() {
        let err = "gallery".parse::<OverlayId>().unwrap_err();
        assert_eq!(err, ParseOverlayIdError("gallery".to_string()));
        assert!(err.to_string().contains("gallery"));
    }

    #[test]
    fn main_is_the_default_overlay() {
        assert_eq!(OverlayId::default(), OverlayId::Main);
    }
}

//! Interactive categories.
//!
//! Scene nodes are classified once, when they are registered, from their name
//! and an optional explicit tag. The result is cached on the entity; nothing
//! re-matches names per frame.

use crate::OverlayId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring (case-insensitive) marking a node name as interactive.
pub const INTERACTIVE_MARKER: &str = "raycaster";

/// Name keywords checked in order; the first match wins.
const NAME_KEYWORDS: [(&str, ActionCategory); 7] = [
    ("aboutme", ActionCategory::OpenAbout),
    ("about", ActionCategory::OpenAbout),
    ("projects", ActionCategory::OpenProjects),
    ("workexperience", ActionCategory::OpenWork),
    ("work", ActionCategory::OpenWork),
    ("contact", ActionCategory::OpenContact),
    ("main", ActionCategory::OpenMain),
];

/// The named action an interactive entity stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionCategory {
    /// Open the about overlay.
    OpenAbout,
    /// Open the projects overlay.
    OpenProjects,
    /// Open the work experience overlay.
    OpenWork,
    /// Open the contact overlay.
    OpenContact,
    /// Open the main overlay.
    OpenMain,
    /// Interactive, but matching no known action.
    Unrecognized,
}

impl ActionCategory {
    /// Classify a node from its name and optional explicit tag.
    ///
    /// An explicit tag always takes precedence over the name. The function is
    /// total: anything it cannot place is [`ActionCategory::Unrecognized`].
    pub fn classify(name: &str, tag: Option<&str>) -> Self {
        if let Some(tag) = tag {
            return Self::from_tag(tag);
        }

        let lowered = name.to_ascii_lowercase();
        NAME_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(Self::Unrecognized)
    }

    /// Parse an explicit tag such as `open-projects`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "open-about" => Self::OpenAbout,
            "open-projects" => Self::OpenProjects,
            "open-work" => Self::OpenWork,
            "open-contact" => Self::OpenContact,
            "open-main" => Self::OpenMain,
            _ => Self::Unrecognized,
        }
    }

    /// Overlay this category opens, or `None` when unrecognized.
    pub const fn overlay(self) -> Option<OverlayId> {
        match self {
            Self::OpenAbout => Some(OverlayId::About),
            Self::OpenProjects => Some(OverlayId::Projects),
            Self::OpenWork => Some(OverlayId::Work),
            Self::OpenContact => Some(OverlayId::Contact),
            Self::OpenMain => Some(OverlayId::Main),
            Self::Unrecognized => None,
        }
    }

    /// Canonical tag string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAbout => "open-about",
            Self::OpenProjects => "open-projects",
            Self::OpenWork => "open-work",
            Self::OpenContact => "open-contact",
            Self::OpenMain => "open-main",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a node with this name (and optional tag) takes part in interaction.
pub fn is_interactive_name(name: &str, tag: Option<&str>) -> bool {
    tag.is_some() || name.to_ascii_lowercase().contains(INTERACTIVE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_exported_button_names() {
        let cases = [
            ("aboutme_Raycaster_Pointer_Hover", ActionCategory::OpenAbout),
            ("projects_Raycaster_Pointer_Hover", ActionCategory::OpenProjects),
            ("workexperience_Raycaster_Pointer_Hover", ActionCategory::OpenWork),
            ("contact_Raycaster_Pointer_Hover", ActionCategory::OpenContact),
            ("Main_Raycaster", ActionCategory::OpenMain),
        ];
        for (name, expected) in cases {
            assert_eq!(ActionCategory::classify(name, None), expected, "{name}");
        }
    }

    #[test]
    fn tag_overrides_name() {
        assert_eq!(
            ActionCategory::classify("aboutme_Raycaster", Some("open-contact")),
            ActionCategory::OpenContact
        );
        assert_eq!(
            ActionCategory::classify("aboutme_Raycaster", Some("unknown-x")),
            ActionCategory::Unrecognized
        );
    }

    #[test]
    fn unmatched_names_are_unrecognized() {
        assert_eq!(
            ActionCategory::classify("lamp_Raycaster", None),
            ActionCategory::Unrecognized
        );
        assert_eq!(ActionCategory::Unrecognized.overlay(), None);
    }

    #[test]
    fn every_known_category_maps_to_an_overlay() {
        let known = [
            ActionCategory::OpenAbout,
            ActionCategory::OpenProjects,
            ActionCategory::OpenWork,
            ActionCategory::OpenContact,
            ActionCategory::OpenMain,
        ];
        for category in known {
            assert!(category.overlay().is_some(), "{category}");
            assert_eq!(ActionCategory::from_tag(category.as_str()), category);
        }
    }

    #[test]
    fn interactive_marker_is_case_insensitive() {
        assert!(is_interactive_name("projects_RAYCASTER_Pointer_Hover", None));
        assert!(is_interactive_name("Plant", Some("open-main")));
        assert!(!is_interactive_name("Desk_Text", None));
    }
}

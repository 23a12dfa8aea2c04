//! Click dispatch: resolve the entity under the pointer to an overlay.

use crate::interaction::RaycastHit;
use crate::registry::{EntityId, EntityRegistry};
use folio3d_core::{ActionCategory, OverlayId};
use tracing::warn;

/// Outcome of a dispatched click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDispatch {
    pub entity: EntityId,
    pub category: ActionCategory,
    pub overlay: OverlayId,
    /// Set when the category was unrecognized and the default overlay was used.
    pub fallback: bool,
}

/// Total mapping from category to overlay.
///
/// Returns the overlay and whether `default` had to stand in.
pub fn resolve_overlay(category: ActionCategory, default: OverlayId) -> (OverlayId, bool) {
    match category.overlay() {
        Some(overlay) => (overlay, false),
        None => (default, true),
    }
}

/// Maps committed clicks to overlay requests.
#[derive(Debug, Clone, Copy)]
pub struct ActionDispatcher {
    default_overlay: OverlayId,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(OverlayId::Main)
    }
}

impl ActionDispatcher {
    pub fn new(default_overlay: OverlayId) -> Self {
        Self { default_overlay }
    }

    pub fn default_overlay(&self) -> OverlayId {
        self.default_overlay
    }

    /// Resolve the click target. A miss dispatches nothing.
    pub fn dispatch(
        &self,
        hit: Option<&RaycastHit>,
        registry: &EntityRegistry,
    ) -> Option<ActionDispatch> {
        let entity = registry.entity(hit?.entity)?;
        let (overlay, fallback) = resolve_overlay(entity.category, self.default_overlay);
        if fallback {
            warn!(
                entity = %entity.name,
                category = %entity.category,
                %overlay,
                "unrecognized category; opening default overlay"
            );
        }

        Some(ActionDispatch {
            entity: entity.id,
            category: entity.category,
            overlay,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HitVolumeId;
    use crate::scene::{NodeId, SceneNode};
    use glam::Vec3;

    fn hit(registry: &EntityRegistry, entity: EntityId) -> RaycastHit {
        RaycastHit {
            volume: registry.volume_of(entity).unwrap_or(HitVolumeId(0)),
            entity,
            distance: 1.0,
        }
    }

    #[test]
    fn every_known_category_maps_to_its_overlay() {
        let pairs = [
            (ActionCategory::OpenAbout, OverlayId::About),
            (ActionCategory::OpenProjects, OverlayId::Projects),
            (ActionCategory::OpenWork, OverlayId::Work),
            (ActionCategory::OpenContact, OverlayId::Contact),
            (ActionCategory::OpenMain, OverlayId::Main),
        ];
        for (category, overlay) in pairs {
            assert_eq!(resolve_overlay(category, OverlayId::About), (overlay, false));
        }
        assert_eq!(
            resolve_overlay(ActionCategory::Unrecognized, OverlayId::Contact),
            (OverlayId::Contact, true)
        );
    }

    #[test]
    fn unknown_category_opens_default() {
        let mut registry = EntityRegistry::new();
        let node = SceneNode::mesh("mystery_Raycaster", Vec3::ZERO, Vec3::ONE).with_tag("unknown-x");
        let entity = registry.register_node(NodeId(0), &node, 1.2);

        let dispatch = ActionDispatcher::default()
            .dispatch(Some(&hit(&registry, entity)), &registry)
            .unwrap();
        assert_eq!(dispatch.overlay, OverlayId::Main);
        assert!(dispatch.fallback);
    }

    #[test]
    fn miss_dispatches_nothing() {
        let registry = EntityRegistry::new();
        assert!(ActionDispatcher::default().dispatch(None, &registry).is_none());
    }
}

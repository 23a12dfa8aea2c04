//! Scene composition: populate the entity registry from a scene graph.

use crate::registry::EntityRegistry;
use crate::scene::{SceneGraph, SceneNode};
use folio3d_core::is_interactive_name;
use glam::Vec3;
use tracing::debug;

/// Size of the generated fallback buttons.
pub const FALLBACK_BUTTON_SIZE: Vec3 = Vec3::new(2.0, 1.0, 0.5);

/// Register every interactive mesh of `scene`, one hit volume each.
///
/// A node is interactive when its name carries the interactive marker or it
/// has an explicit tag. Groups never get hit volumes.
pub fn compose(scene: &SceneGraph, oversize: f32) -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    for (id, node) in scene.iter() {
        if !node.is_mesh() || !is_interactive_name(&node.name, node.tag.as_deref()) {
            continue;
        }
        let entity = registry.register_node(id, node, oversize);
        debug!(node = %node.name, ?entity, "registered interactive node");
    }
    debug!(
        entities = registry.entity_count(),
        volumes = registry.volume_count(),
        "scene composed"
    );
    registry
}

/// Minimal scene used when no scene description could be loaded.
pub fn fallback_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add(SceneNode::group("FallbackScene", Vec3::ZERO));
    for (name, position) in [
        ("aboutme_Raycaster", Vec3::new(8.0, 10.0, 10.0)),
        ("projects_Raycaster", Vec3::new(13.0, 10.0, 10.0)),
        ("workexperience_Raycaster", Vec3::new(8.0, 8.0, 10.0)),
        ("contact_Raycaster", Vec3::new(13.0, 8.0, 10.0)),
    ] {
        scene.add(SceneNode::mesh(name, position, FALLBACK_BUTTON_SIZE));
    }
    scene
}

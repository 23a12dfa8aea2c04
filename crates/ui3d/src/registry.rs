//! Entity registry - the one-to-one mapping between hit volumes and entities
//!
//! Populated once while the scene is composed, then read every frame by the
//! raycast dispatcher. Hit volumes live in a flat list; the raycaster never
//! walks the scene graph.

use crate::interaction::HitVolume;
use crate::scene::{NodeId, SceneNode};
use folio3d_core::ActionCategory;
use glam::Vec3;
use std::collections::HashMap;
use tracing::warn;

/// Handle to a registered entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Handle to a hit volume in the registry's flat list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitVolumeId(pub u32);

/// A semantic scene object the pointer can interact with
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    /// Source node name
    pub name: String,
    /// Classified once at registration
    pub category: ActionCategory,
    /// Renderable node this entity animates
    pub node: NodeId,
    /// Node scale captured at registration; hover always returns here
    pub initial_scale: Vec3,
}

/// Flat registry of entities and their hit volumes
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    volumes: Vec<HitVolume>,
    volume_owner: HashMap<HitVolumeId, EntityId>,
    entity_volume: HashMap<EntityId, HitVolumeId>,
    by_node: HashMap<NodeId, EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entity for `node`, snapshotting its current scale.
    ///
    /// A node never gets two entities: asking again returns the existing id
    /// and leaves its snapshot untouched.
    pub fn insert_entity(&mut self, node_id: NodeId, node: &SceneNode) -> EntityId {
        if let Some(existing) = self.by_node.get(&node_id) {
            return *existing;
        }

        let id = EntityId(self.entities.len() as u32);
        let category = ActionCategory::classify(&node.name, node.tag.as_deref());
        self.entities.push(Entity {
            id,
            name: node.name.clone(),
            category,
            node: node_id,
            initial_scale: node.transform.scale,
        });
        self.by_node.insert(node_id, id);
        id
    }

    /// Add a hit volume to the flat list, initially unowned.
    pub fn insert_volume(&mut self, volume: HitVolume) -> HitVolumeId {
        let id = HitVolumeId(self.volumes.len() as u32);
        self.volumes.push(volume);
        id
    }

    /// Bind `volume` to `entity`, keeping the mapping one-to-one.
    ///
    /// Last write wins: a volume already owned by another entity is moved to
    /// `entity` (logged), and any volume `entity` held before is released.
    /// Returns the entity that lost the volume, if any. Unknown ids are ignored.
    pub fn register(&mut self, entity: EntityId, volume: HitVolumeId) -> Option<EntityId> {
        if self.entity(entity).is_none() || self.volume(volume).is_none() {
            warn!(?entity, ?volume, "ignoring registration of unknown entity or hit volume");
            return None;
        }

        if let Some(previous_volume) = self.entity_volume.insert(entity, volume) {
            if previous_volume != volume {
                self.volume_owner.remove(&previous_volume);
            }
        }

        let displaced = self
            .volume_owner
            .insert(volume, entity)
            .filter(|previous| *previous != entity);

        if let Some(previous) = displaced {
            self.entity_volume.remove(&previous);
            warn!(
                ?volume,
                from = %self.entities[previous.0 as usize].name,
                to = %self.entities[entity.0 as usize].name,
                "hit volume re-registered; last registration wins"
            );
        }

        displaced
    }

    /// Build a hit volume for `node` and register it with a (possibly new) entity.
    pub fn register_node(&mut self, node_id: NodeId, node: &SceneNode, oversize: f32) -> EntityId {
        let entity = self.insert_entity(node_id, node);
        let volume = self.insert_volume(HitVolume::from_node(node_id, node, oversize));
        self.register(entity, volume);
        entity
    }

    /// Exact lookup of the entity bound to `volume`.
    pub fn lookup(&self, volume: HitVolumeId) -> Option<&Entity> {
        self.volume_owner
            .get(&volume)
            .and_then(|entity| self.entity(*entity))
    }

    /// Scale snapshot taken when `entity` was registered.
    pub fn initial_scale(&self, entity: EntityId) -> Option<Vec3> {
        self.entity(entity).map(|e| e.initial_scale)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0 as usize)
    }

    /// The hit volume currently bound to `entity`.
    pub fn volume_of(&self, entity: EntityId) -> Option<HitVolumeId> {
        self.entity_volume.get(&entity).copied()
    }

    pub fn volume(&self, id: HitVolumeId) -> Option<&HitVolume> {
        self.volumes.get(id.0 as usize)
    }

    /// Entity registered for a scene node.
    pub fn entity_for_node(&self, node: NodeId) -> Option<EntityId> {
        self.by_node.get(&node).copied()
    }

    /// Every hit volume, owned or not, in insertion order.
    pub fn volumes(&self) -> impl Iterator<Item = (HitVolumeId, &HitVolume)> {
        self.volumes
            .iter()
            .enumerate()
            .map(|(index, volume)| (HitVolumeId(index as u32), volume))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }
}

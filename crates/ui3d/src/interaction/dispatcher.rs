//! Pointer raycast dispatch against the flat hit-volume list

use super::raycaster::{screen_to_ndc, Ray};
use crate::camera::CameraView;
use crate::registry::{EntityId, EntityRegistry, HitVolumeId};
use glam::Vec2;

/// Latest pointer position reported by the host.
///
/// Starts empty: before the first move there is no pointer, and every cast misses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    screen: Option<(f32, f32)>,
    viewport: (u32, u32),
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move in pixel coordinates.
    pub fn move_to(&mut self, screen: (f32, f32), viewport: (u32, u32)) {
        self.screen = Some(screen);
        self.viewport = viewport;
    }

    /// Forget the pointer (left the canvas).
    pub fn clear(&mut self) {
        self.screen = None;
    }

    pub fn screen(&self) -> Option<(f32, f32)> {
        self.screen
    }

    /// Pointer position in normalized device coordinates.
    pub fn ndc(&self) -> Option<Vec2> {
        self.screen
            .map(|screen| screen_to_ndc(screen, self.viewport))
    }
}

/// Nearest volume hit by a pointer ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub volume: HitVolumeId,
    pub entity: EntityId,
    pub distance: f32,
}

/// Casts pointer rays against the registry's hit volumes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaycastDispatcher;

impl RaycastDispatcher {
    /// Cast the camera ray through the pointer, if there is one.
    pub fn cast_pointer(
        &self,
        pointer: &PointerState,
        camera: &CameraView,
        registry: &EntityRegistry,
    ) -> Option<RaycastHit> {
        let ndc = pointer.ndc()?;
        self.cast(&camera.ray_through(ndc), registry)
    }

    /// Nearest intersection along `ray`, resolved to its entity.
    ///
    /// A nearest volume without an owner is a miss; it still occludes
    /// volumes behind it.
    pub fn cast(&self, ray: &Ray, registry: &EntityRegistry) -> Option<RaycastHit> {
        let (volume, distance) = registry
            .volumes()
            .filter_map(|(id, volume)| volume.intersect(ray).map(|t| (id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let entity = registry.lookup(volume)?;
        Some(RaycastHit {
            volume,
            entity: entity.id,
            distance,
        })
    }
}

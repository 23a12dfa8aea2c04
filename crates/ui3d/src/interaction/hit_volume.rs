//! Hit volumes - invisible, oversized collision proxies for scene nodes

use super::raycaster::{Aabb, Ray};
use crate::scene::{NodeId, SceneNode};

/// Default oversize applied to a node's bounds.
pub const DEFAULT_HIT_VOLUME_SCALE: f32 = 1.2;

/// Non-rendered collision proxy used only for pointer ray tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitVolume {
    /// World-space box the ray is tested against
    pub bounds: Aabb,
    /// Node whose bounds this volume shadows
    pub source: NodeId,
}

impl HitVolume {
    /// Build a proxy from a world-positioned node.
    ///
    /// The volume is `bounds.size * factor`, recentered on the bounds center.
    /// Negative factors are treated as zero; the source node is not touched.
    pub fn from_node(source: NodeId, node: &SceneNode, factor: f32) -> Self {
        let bounds = node.world_bounds();
        let factor = factor.max(0.0);
        Self {
            bounds: Aabb::from_center_size(bounds.center(), bounds.size() * factor),
            source,
        }
    }

    /// Distance along `ray` to this volume, if it is hit
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.bounds.ray_intersection(ray)
    }
}

//! Read-only camera view used to build pointer rays.
//!
//! Camera movement belongs to the host; the interaction layer only needs the
//! current eye, target and projection.

use crate::interaction::{ndc_to_ray, Ray};
use glam::{Mat4, Vec2, Vec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 35.0;

/// Perspective camera looking at a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.5, 2.0, 25.0),
            target: Vec3::new(10.5, 2.0, 10.0),
            fov_degrees: DEFAULT_FOV_DEGREES,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl CameraView {
    /// Camera at `position` looking at `target`, sized for a viewport in pixels.
    pub fn looking_at(position: Vec3, target: Vec3, viewport: (u32, u32)) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
        .with_viewport(viewport)
    }

    /// Recompute the aspect ratio for a viewport in pixels.
    pub fn with_viewport(mut self, viewport: (u32, u32)) -> Self {
        self.aspect = viewport.0.max(1) as f32 / viewport.1.max(1) as f32;
        self
    }

    /// World space -> camera space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Camera space -> clip space.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        ndc_to_ray(ndc, &self.view_matrix(), &self.projection_matrix())
    }
}

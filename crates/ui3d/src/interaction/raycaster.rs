//! Ray casting primitives - pointer rays and axis-aligned boxes

use glam::{Mat4, Vec2, Vec3};

/// A ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin (camera position for pointer rays)
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Create an AABB from center position and size
    ///
    /// Negative size components are clamped to zero.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size.max(Vec3::ZERO) * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Smallest box enclosing every point; a zero-extent box at the origin for no points
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::from_center_size(Vec3::ZERO, Vec3::ZERO);
        };
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self { min, max }
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent of the box along each axis (never negative)
    pub fn size(&self) -> Vec3 {
        (self.max - self.min).max(Vec3::ZERO)
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box enclosing this box after `matrix` is applied
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::from_points(self.corners().map(|c| matrix.transform_point3(c)))
    }

    /// Test if a ray intersects this AABB
    /// Returns distance to intersection point if hit
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let ray_origin = ray.origin;
        let ray_dir = ray.direction;
        let inv_dir = Vec3::new(1.0 / ray_dir.x, 1.0 / ray_dir.y, 1.0 / ray_dir.z);

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Box entirely behind the ray origin
        if tmax < 0.0 {
            return None;
        }

        // Slabs do not overlap (NaN comes from a zero direction on a slab boundary)
        if tmin.is_nan() || tmax.is_nan() || tmin > tmax {
            return None;
        }

        // Origin inside the box
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// Convert pixel coordinates to normalized device coordinates (-1 to 1, +Y up)
pub fn screen_to_ndc(screen_pos: (f32, f32), screen_size: (u32, u32)) -> Vec2 {
    let width = screen_size.0.max(1) as f32;
    let height = screen_size.1.max(1) as f32;
    Vec2::new(
        (2.0 * screen_pos.0) / width - 1.0,
        1.0 - (2.0 * screen_pos.1) / height, // Flip Y
    )
}

/// Cast a world-space ray from the camera through a point in normalized device coordinates
pub fn ndc_to_ray(ndc: Vec2, view_matrix: &Mat4, projection_matrix: &Mat4) -> Ray {
    let inv_view_proj = (*projection_matrix * *view_matrix).inverse();

    // Unproject points on the near and far planes (glam projections use a 0..1 depth range)
    let near = inv_view_proj.project_point3(ndc.extend(0.0));
    let far = inv_view_proj.project_point3(ndc.extend(1.0));

    // Ray origin is camera position (from view matrix)
    let origin = view_matrix.inverse().transform_point3(Vec3::ZERO);

    Ray::new(origin, far - near)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_ray_intersection() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);

        // Ray pointing at center from positive Z
        let hit = aabb.ray_intersection(&Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!(hit.is_some());
        assert!((hit.unwrap() - 1.5).abs() < 0.001);

        // Ray missing the box
        let miss = aabb.ray_intersection(&Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!(miss.is_none());

        // Box behind the ray
        let behind = aabb.ray_intersection(&Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::Z));
        assert!(behind.is_none());
    }

    #[test]
    fn test_ray_from_inside_box_hits_exit_face() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let hit = aabb.ray_intersection(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_box_never_panics() {
        let point = Aabb::from_center_size(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO);
        assert_eq!(point.size(), Vec3::ZERO);
        let hit = point.ray_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(hit.map_or(true, |t| (t - 5.0).abs() < 0.001));
        assert!(point
            .ray_intersection(&Ray::new(Vec3::X, Vec3::NEG_Z))
            .is_none());
    }

    #[test]
    fn test_transformed_box_encloses_rotated_corners() {
        let unit = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0));
        let rotated = unit.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!((rotated.size() - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        assert_eq!(screen_to_ndc((0.0, 0.0), (800, 600)), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc((800.0, 600.0), (800, 600)), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc((400.0, 300.0), (800, 600)), Vec2::ZERO);
    }

    #[test]
    fn test_center_ray_follows_view_direction() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(0.6, 16.0 / 9.0, 0.1, 200.0);

        let ray = ndc_to_ray(Vec2::ZERO, &view, &proj);
        assert!((ray.origin - eye).length() < 1e-4);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }
}

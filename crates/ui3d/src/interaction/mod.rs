//! Pointer interaction: rays, hit volumes, and raycast dispatch.

pub mod dispatcher;
pub mod hit_volume;
pub mod raycaster;

pub use dispatcher::{PointerState, RaycastDispatcher, RaycastHit};
pub use hit_volume::{HitVolume, DEFAULT_HIT_VOLUME_SCALE};
pub use raycaster::{ndc_to_ray, screen_to_ndc, Aabb, Ray};

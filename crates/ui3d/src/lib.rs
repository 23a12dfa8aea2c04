//! Pointer interaction layer for folio3d scenes
//!
//! Interactive scene nodes get invisible, oversized hit volumes. Each frame a
//! ray is cast from the camera through the pointer against those volumes only;
//! the nearest hit drives a hover state machine and, on click, an overlay
//! request. While an overlay is active, hover and click are suppressed.
//!
//! # Example
//!
//! ```rust
//! use folio3d_ui3d::{fallback_scene, CameraView, InteractionContext, InteractionSettings};
//! use glam::Vec3;
//!
//! let mut scene = fallback_scene();
//! let mut context = InteractionContext::compose(InteractionSettings::default(), &scene);
//! let camera = CameraView::looking_at(
//!     Vec3::new(8.0, 10.0, 20.0),
//!     Vec3::new(8.0, 10.0, 10.0),
//!     (800, 600),
//! );
//!
//! context.pointer_moved((400.0, 300.0), (800, 600));
//! let report = context.frame(1.0 / 60.0, &camera, &mut scene);
//! assert!(context.hovered().is_some());
//! assert_eq!(report.events.len(), 1);
//! ```

pub mod action;
pub mod camera;
pub mod composition;
pub mod context;
pub mod hover;
pub mod interaction;
pub mod overlay;
pub mod registry;
pub mod scene;
pub mod tween;

// Re-export commonly used types
pub use action::{resolve_overlay, ActionDispatch, ActionDispatcher};
pub use camera::CameraView;
pub use composition::{compose, fallback_scene};
pub use context::{
    FeedbackToggles, FrameReport, InteractionContext, InteractionEvent, InteractionSettings,
};
pub use hover::{CursorStyle, HoverEvent, HoverFeedback, HoverMachine, HoverState};
pub use interaction::{
    HitVolume, PointerState, Ray, RaycastDispatcher, RaycastHit, DEFAULT_HIT_VOLUME_SCALE,
};
pub use overlay::{
    LoggingPresenter, OverlayEvent, OverlayMachine, OverlayPhase, OverlayPresenter, OverlayVisual,
};
pub use registry::{Entity, EntityId, EntityRegistry, HitVolumeId};
pub use scene::{NodeId, NodeKind, SceneDescription, SceneError, SceneGraph, SceneNode};
pub use tween::{Easing, Tween, TweenSlot, TweenToken};

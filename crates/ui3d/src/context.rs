//! Interaction context: all interaction state for one scene, stepped per frame.
//!
//! The host feeds pointer and button input between frames and calls
//! [`InteractionContext::frame`] once per display frame. Within a frame the
//! raycast always runs first; hover and click consume its result only while
//! no overlay is active.

use crate::action::{ActionDispatch, ActionDispatcher};
use crate::camera::CameraView;
use crate::composition::compose;
use crate::hover::{CursorStyle, HoverEvent, HoverFeedback, HoverMachine, HoverState};
use crate::interaction::{PointerState, RaycastDispatcher, RaycastHit, DEFAULT_HIT_VOLUME_SCALE};
use crate::overlay::{LoggingPresenter, OverlayEvent, OverlayMachine, OverlayPhase, OverlayPresenter};
use crate::registry::{EntityId, EntityRegistry};
use crate::scene::SceneGraph;
use folio3d_core::{ActionCategory, OverlayId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which hover effects are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackToggles {
    pub scale: bool,
    pub highlight: bool,
    pub cursor: bool,
}

impl Default for FeedbackToggles {
    fn default() -> Self {
        Self {
            scale: true,
            highlight: true,
            cursor: true,
        }
    }
}

impl FeedbackToggles {
    pub fn flags(&self) -> HoverFeedback {
        let mut flags = HoverFeedback::empty();
        flags.set(HoverFeedback::SCALE, self.scale);
        flags.set(HoverFeedback::HIGHLIGHT, self.highlight);
        flags.set(HoverFeedback::CURSOR, self.cursor);
        flags
    }
}

/// Tunables for the interaction layer (`[interaction]` in the scene config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Hit volume size relative to the node bounds
    pub hit_volume_scale: f32,
    /// Scale multiplier applied while hovered
    pub hover_scale: f32,
    /// Hover scale animation length in seconds
    pub hover_duration: f32,
    pub hover_feedback: FeedbackToggles,
    /// Overlay opened for unrecognized categories
    pub default_overlay: OverlayId,
    pub overlay_open_duration: f32,
    pub overlay_close_duration: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_volume_scale: DEFAULT_HIT_VOLUME_SCALE,
            hover_scale: 1.2,
            hover_duration: 0.3,
            hover_feedback: FeedbackToggles::default(),
            default_overlay: OverlayId::Main,
            overlay_open_duration: 0.5,
            overlay_close_duration: 0.2,
        }
    }
}

/// Observable interaction event, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InteractionEvent {
    HoverEnter {
        entity: String,
    },
    HoverExit {
        entity: String,
    },
    Action {
        entity: String,
        category: ActionCategory,
        overlay: OverlayId,
        fallback: bool,
    },
    OverlayOpening {
        overlay: OverlayId,
    },
    OverlayOpened {
        overlay: OverlayId,
    },
    OverlayClosing {
        overlay: OverlayId,
    },
    OverlayClosed {
        overlay: OverlayId,
    },
}

impl InteractionEvent {
    /// Same label the serialized `kind` field carries.
    pub fn kind(&self) -> &'static str {
        match self {
            InteractionEvent::HoverEnter { .. } => "hover-enter",
            InteractionEvent::HoverExit { .. } => "hover-exit",
            InteractionEvent::Action { .. } => "action",
            InteractionEvent::OverlayOpening { .. } => "overlay-opening",
            InteractionEvent::OverlayOpened { .. } => "overlay-opened",
            InteractionEvent::OverlayClosing { .. } => "overlay-closing",
            InteractionEvent::OverlayClosed { .. } => "overlay-closed",
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Raw raycast result, computed even while an overlay suppresses it
    pub hit: Option<RaycastHit>,
    pub events: Vec<InteractionEvent>,
}

/// Owns the registry and every interaction state machine for one scene.
pub struct InteractionContext {
    settings: InteractionSettings,
    registry: EntityRegistry,
    pointer: PointerState,
    raycaster: RaycastDispatcher,
    hover: HoverMachine,
    overlay: OverlayMachine,
    actions: ActionDispatcher,
    presenter: Box<dyn OverlayPresenter>,
    pending_click: bool,
    pending_close: bool,
}

impl InteractionContext {
    /// Context over an already populated registry.
    pub fn new(settings: InteractionSettings, registry: EntityRegistry) -> Self {
        Self {
            hover: HoverMachine::new(
                settings.hover_feedback.flags(),
                settings.hover_scale,
                settings.hover_duration,
            ),
            overlay: OverlayMachine::new(
                settings.overlay_open_duration,
                settings.overlay_close_duration,
            ),
            actions: ActionDispatcher::new(settings.default_overlay),
            raycaster: RaycastDispatcher,
            pointer: PointerState::new(),
            presenter: Box::new(LoggingPresenter),
            pending_click: false,
            pending_close: false,
            registry,
            settings,
        }
    }

    /// Compose `scene` and build a context over the result.
    pub fn compose(settings: InteractionSettings, scene: &SceneGraph) -> Self {
        let registry = compose(scene, settings.hit_volume_scale);
        Self::new(settings, registry)
    }

    /// Replace the overlay presenter.
    pub fn with_presenter(mut self, presenter: Box<dyn OverlayPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    pub fn hovered(&self) -> Option<EntityId> {
        self.hover.hovered()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.hover.cursor()
    }

    pub fn overlay_phase(&self) -> OverlayPhase {
        self.overlay.phase()
    }

    pub fn overlay(&self) -> &OverlayMachine {
        &self.overlay
    }

    /// Pointer moved to `screen` pixels within a `viewport`.
    pub fn pointer_moved(&mut self, screen: (f32, f32), viewport: (u32, u32)) {
        self.pointer.move_to(screen, viewport);
    }

    /// Pointer left the canvas.
    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    /// Committed click on the scene; resolved during the next frame.
    pub fn click(&mut self) {
        self.pending_click = true;
    }

    /// Click on the overlay backdrop.
    pub fn backdrop_clicked(&mut self) {
        self.request_close();
    }

    /// The overlay's exit control was pressed.
    pub fn exit_pressed(&mut self) {
        self.request_close();
    }

    fn request_close(&mut self) {
        self.pending_close = true;
    }

    /// Open an overlay directly, bypassing the scene. Only accepted while closed.
    pub fn open_overlay(&mut self, overlay: OverlayId) -> bool {
        self.overlay.open(overlay, self.presenter.as_mut())
    }

    /// Run one frame of interaction.
    pub fn frame(&mut self, dt: f32, camera: &CameraView, scene: &mut SceneGraph) -> FrameReport {
        let mut events = Vec::new();

        // Always cast; suppression happens at the consumers below
        let hit = self
            .raycaster
            .cast_pointer(&self.pointer, camera, &self.registry);
        let interactive = self.overlay.is_closed();

        if interactive {
            let transitions = self
                .hover
                .apply(hit.map(|h| h.entity), &self.registry, scene);
            events.extend(transitions.into_iter().map(|t| self.hover_event(t)));
        }

        if std::mem::take(&mut self.pending_click) {
            if interactive {
                if let Some(dispatch) = self.actions.dispatch(hit.as_ref(), &self.registry) {
                    events.push(self.action_event(&dispatch));
                    if self.overlay.open(dispatch.overlay, self.presenter.as_mut()) {
                        events.push(InteractionEvent::OverlayOpening {
                            overlay: dispatch.overlay,
                        });
                    }
                }
            } else {
                debug!(phase = ?self.overlay.phase(), "click ignored while overlay active");
            }
        }

        if std::mem::take(&mut self.pending_close) {
            let closing = self.overlay.phase().overlay();
            if self.overlay.close() {
                if let Some(overlay) = closing {
                    events.push(InteractionEvent::OverlayClosing { overlay });
                }
            }
        }

        match self.overlay.advance(dt, self.presenter.as_mut()) {
            Some(OverlayEvent::Opened(overlay)) => {
                events.push(InteractionEvent::OverlayOpened { overlay });
            }
            Some(OverlayEvent::Closed(overlay)) => {
                events.push(InteractionEvent::OverlayClosed { overlay });
                if let Some(exit) = self.hover.clear(&self.registry, scene) {
                    events.push(self.hover_event(exit));
                }
            }
            None => {}
        }

        self.hover.advance(dt, scene);

        FrameReport { hit, events }
    }

    fn entity_name(&self, entity: EntityId) -> String {
        self.registry
            .entity(entity)
            .map(|e| e.name.clone())
            .unwrap_or_default()
    }

    fn hover_event(&self, event: HoverEvent) -> InteractionEvent {
        match event {
            HoverEvent::Enter(entity) => InteractionEvent::HoverEnter {
                entity: self.entity_name(entity),
            },
            HoverEvent::Exit(entity) => InteractionEvent::HoverExit {
                entity: self.entity_name(entity),
            },
        }
    }

    fn action_event(&self, dispatch: &ActionDispatch) -> InteractionEvent {
        InteractionEvent::Action {
            entity: self.entity_name(dispatch.entity),
            category: dispatch.category,
            overlay: dispatch.overlay,
            fallback: dispatch.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::fallback_scene;
    use glam::Vec3;

    const VIEWPORT: (u32, u32) = (800, 600);
    const DT: f32 = 1.0 / 60.0;

    fn camera() -> CameraView {
        CameraView::looking_at(Vec3::new(8.0, 10.0, 20.0), Vec3::new(8.0, 10.0, 10.0), VIEWPORT)
    }

    fn setup() -> (InteractionContext, SceneGraph) {
        let scene = fallback_scene();
        let context = InteractionContext::compose(InteractionSettings::default(), &scene);
        (context, scene)
    }

    #[test]
    fn pointer_over_button_hovers_it() {
        let (mut context, mut scene) = setup();
        context.pointer_moved((400.0, 300.0), VIEWPORT);

        let report = context.frame(DT, &camera(), &mut scene);
        assert!(report.hit.is_some());
        assert_eq!(
            report.events,
            vec![InteractionEvent::HoverEnter {
                entity: "aboutme_Raycaster".into()
            }]
        );
        assert_eq!(context.cursor(), CursorStyle::Pointer);
    }

    #[test]
    fn click_opens_overlay_and_backdrop_closes_it() {
        let (mut context, mut scene) = setup();
        let camera = camera();
        context.pointer_moved((400.0, 300.0), VIEWPORT);
        context.click();

        let report = context.frame(DT, &camera, &mut scene);
        assert!(report.events.contains(&InteractionEvent::OverlayOpening {
            overlay: OverlayId::About
        }));
        assert_eq!(context.overlay_phase(), OverlayPhase::Opening(OverlayId::About));

        for _ in 0..40 {
            context.frame(DT, &camera, &mut scene);
        }
        assert_eq!(context.overlay_phase(), OverlayPhase::Open(OverlayId::About));

        context.backdrop_clicked();
        let mut closed = Vec::new();
        for _ in 0..20 {
            closed.extend(context.frame(DT, &camera, &mut scene).events);
        }
        assert!(closed.contains(&InteractionEvent::OverlayClosed {
            overlay: OverlayId::About
        }));
        assert!(closed.contains(&InteractionEvent::HoverExit {
            entity: "aboutme_Raycaster".into()
        }));
        assert!(context.overlay_phase().is_closed());
    }

    #[test]
    fn raycast_runs_while_suppressed() {
        let (mut context, mut scene) = setup();
        context.open_overlay(OverlayId::Contact);
        context.pointer_moved((400.0, 300.0), VIEWPORT);

        let report = context.frame(DT, &camera(), &mut scene);
        assert!(report.hit.is_some());
        assert!(report.events.is_empty());
        assert_eq!(context.hover_state(), HoverState::Idle);
    }

    #[test]
    fn exit_control_closes_like_the_backdrop() {
        let (mut context, mut scene) = setup();
        context.open_overlay(OverlayId::Work);
        context.exit_pressed();
        let report = context.frame(DT, &camera(), &mut scene);
        assert_eq!(
            report.events,
            vec![InteractionEvent::OverlayClosing {
                overlay: OverlayId::Work
            }]
        );
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let settings: InteractionSettings = serde_json::from_str(
            r#"{"hover_scale": 1.1, "default_overlay": "contact", "hover_feedback": {"cursor": false}}"#,
        )
        .unwrap();
        assert_eq!(settings.hover_scale, 1.1);
        assert_eq!(settings.default_overlay, OverlayId::Contact);
        assert_eq!(
            settings.hover_feedback.flags(),
            HoverFeedback::SCALE | HoverFeedback::HIGHLIGHT
        );
        assert_eq!(settings.hit_volume_scale, DEFAULT_HIT_VOLUME_SCALE);
    }
}

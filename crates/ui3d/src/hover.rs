//! Hover state machine.
//!
//! Holds at most one hovered entity. Visual feedback fires once per
//! transition: the exit effect of the previous entity is always applied
//! before the enter effect of the next one. Scale animations run on one
//! [`TweenSlot`] per node, so a new transition cancels whatever was still
//! animating that node.

use crate::registry::{EntityId, EntityRegistry};
use crate::scene::{NodeId, SceneGraph};
use crate::tween::{Easing, Tween, TweenSlot};
use glam::Vec3;
use std::collections::HashMap;
use tracing::debug;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Visual effects applied on hover enter and undone on exit.
    pub struct HoverFeedback: u8 {
        const SCALE = 0b0000_0001;
        const HIGHLIGHT = 0b0000_0010;
        const CURSOR = 0b0000_0100;
    }
}

impl Default for HoverFeedback {
    fn default() -> Self {
        HoverFeedback::all()
    }
}

/// Current hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(EntityId),
}

/// Pointer cursor requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// A hover transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(EntityId),
    Exit(EntityId),
}

/// Overshoot of the hover scale easing.
const HOVER_OVERSHOOT: f32 = 2.0;

/// Drives hover transitions and their scale animations.
#[derive(Debug)]
pub struct HoverMachine {
    state: HoverState,
    cursor: CursorStyle,
    feedback: HoverFeedback,
    hover_scale: f32,
    duration: f32,
    scale_tweens: HashMap<NodeId, TweenSlot<Vec3>>,
}

impl HoverMachine {
    pub fn new(feedback: HoverFeedback, hover_scale: f32, duration: f32) -> Self {
        Self {
            state: HoverState::Idle,
            cursor: CursorStyle::Default,
            feedback,
            hover_scale,
            duration,
            scale_tweens: HashMap::new(),
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> Option<EntityId> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering(entity) => Some(entity),
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Whether a scale animation is still running on `node`.
    pub fn is_animating(&self, node: NodeId) -> bool {
        self.scale_tweens
            .get(&node)
            .is_some_and(TweenSlot::is_active)
    }

    /// Feed this frame's resolved target. Emits nothing while steady.
    pub fn apply(
        &mut self,
        target: Option<EntityId>,
        registry: &EntityRegistry,
        scene: &mut SceneGraph,
    ) -> Vec<HoverEvent> {
        let mut events = Vec::new();
        match (self.state, target) {
            (HoverState::Idle, None) => {}
            (HoverState::Hovering(current), Some(next)) if current == next => {}
            (HoverState::Idle, Some(next)) => {
                self.enter(next, registry, scene);
                events.push(HoverEvent::Enter(next));
            }
            (HoverState::Hovering(current), None) => {
                self.exit(current, registry, scene);
                events.push(HoverEvent::Exit(current));
            }
            (HoverState::Hovering(current), Some(next)) => {
                self.exit(current, registry, scene);
                events.push(HoverEvent::Exit(current));
                self.enter(next, registry, scene);
                events.push(HoverEvent::Enter(next));
            }
        }
        events
    }

    /// Drop any hover, running the exit effect if something was hovered.
    pub fn clear(&mut self, registry: &EntityRegistry, scene: &mut SceneGraph) -> Option<HoverEvent> {
        let current = self.hovered()?;
        self.exit(current, registry, scene);
        Some(HoverEvent::Exit(current))
    }

    /// Step running scale animations and write them to their nodes.
    pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) {
        for (node_id, slot) in &mut self.scale_tweens {
            if let Some(step) = slot.advance(dt) {
                if let Some(node) = scene.get_mut(*node_id) {
                    node.transform.scale = step.value;
                }
            }
        }
        self.scale_tweens.retain(|_, slot| slot.is_active());
    }

    fn enter(&mut self, entity: EntityId, registry: &EntityRegistry, scene: &mut SceneGraph) {
        self.state = HoverState::Hovering(entity);
        let Some(record) = registry.entity(entity) else {
            return;
        };
        debug!(entity = %record.name, "hover enter");

        if self.feedback.contains(HoverFeedback::SCALE) {
            let target = record.initial_scale * self.hover_scale;
            self.start_scale(record.node, target, scene);
        }
        if self.feedback.contains(HoverFeedback::HIGHLIGHT) {
            if let Some(node) = scene.get_mut(record.node) {
                node.highlighted = true;
            }
        }
        if self.feedback.contains(HoverFeedback::CURSOR) {
            self.cursor = CursorStyle::Pointer;
        }
    }

    fn exit(&mut self, entity: EntityId, registry: &EntityRegistry, scene: &mut SceneGraph) {
        self.state = HoverState::Idle;
        self.cursor = CursorStyle::Default;
        let Some(record) = registry.entity(entity) else {
            return;
        };
        debug!(entity = %record.name, "hover exit");

        if self.feedback.contains(HoverFeedback::SCALE) {
            self.start_scale(record.node, record.initial_scale, scene);
        }
        if let Some(node) = scene.get_mut(record.node) {
            node.highlighted = false;
        }
    }

    fn start_scale(&mut self, node_id: NodeId, target: Vec3, scene: &SceneGraph) {
        let Some(node) = scene.get(node_id) else {
            return;
        };
        let from = node.transform.scale;
        self.scale_tweens.entry(node_id).or_default().start(Tween::new(
            from,
            target,
            self.duration,
            Easing::BackOut(HOVER_OVERSHOOT),
        ));
    }
}

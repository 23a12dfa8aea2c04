//! Modal overlay state machine.
//!
//! Cycles `Closed -> Opening -> Open -> Closing -> Closed`, one overlay at a
//! time. Scene interaction is suppressed whenever the phase is not `Closed`.
//! Presentation is delegated to an [`OverlayPresenter`].

use crate::tween::{Easing, Tween, TweenSlot};
use folio3d_core::OverlayId;
use tracing::{debug, info};

/// Overlay lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening(OverlayId),
    Open(OverlayId),
    Closing(OverlayId),
}

impl OverlayPhase {
    /// Overlay shown in this phase, if any.
    pub fn overlay(&self) -> Option<OverlayId> {
        match *self {
            OverlayPhase::Closed => None,
            OverlayPhase::Opening(id) | OverlayPhase::Open(id) | OverlayPhase::Closing(id) => {
                Some(id)
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, OverlayPhase::Closed)
    }
}

/// Completion notifications from [`OverlayMachine::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Opened(OverlayId),
    Closed(OverlayId),
}

/// Animated appearance of the active overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayVisual {
    /// 0 = transparent, 1 = opaque
    pub opacity: f32,
    /// Content scale; overshoots past 1 while opening
    pub scale: f32,
}

impl OverlayVisual {
    const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: 0.0,
    };
}

/// Host-side overlay presentation (markup, visibility).
pub trait OverlayPresenter {
    /// Make the overlay visible before its opening animation.
    fn show(&mut self, overlay: OverlayId);

    /// Apply the current animated appearance. Called once per frame while an
    /// opening or closing animation runs, never while the overlay sits open.
    fn present(&mut self, overlay: OverlayId, visual: OverlayVisual) {
        let _ = (overlay, visual);
    }

    /// Hide the overlay after its closing animation.
    fn hide(&mut self, overlay: OverlayId);
}

/// Presenter that only logs; used when no host presentation is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPresenter;

impl OverlayPresenter for LoggingPresenter {
    fn show(&mut self, overlay: OverlayId) {
        info!(%overlay, "overlay shown");
    }

    fn hide(&mut self, overlay: OverlayId) {
        info!(%overlay, "overlay hidden");
    }
}

const OPEN_OVERSHOOT: f32 = 2.0;

/// Owns the overlay phase and its enter/exit animations.
#[derive(Debug)]
pub struct OverlayMachine {
    phase: OverlayPhase,
    visual: OverlayVisual,
    opacity: TweenSlot<f32>,
    scale: TweenSlot<f32>,
    open_duration: f32,
    close_duration: f32,
}

impl OverlayMachine {
    pub fn new(open_duration: f32, close_duration: f32) -> Self {
        Self {
            phase: OverlayPhase::Closed,
            visual: OverlayVisual::HIDDEN,
            opacity: TweenSlot::new(),
            scale: TweenSlot::new(),
            open_duration,
            close_duration,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase.is_closed()
    }

    pub fn visual(&self) -> OverlayVisual {
        self.visual
    }

    /// Start opening `overlay`. Accepted only while closed; otherwise a no-op.
    pub fn open(&mut self, overlay: OverlayId, presenter: &mut dyn OverlayPresenter) -> bool {
        if !self.phase.is_closed() {
            debug!(%overlay, phase = ?self.phase, "open ignored; overlay already active");
            return false;
        }

        self.phase = OverlayPhase::Opening(overlay);
        self.visual = OverlayVisual::HIDDEN;
        let easing = Easing::BackOut(OPEN_OVERSHOOT);
        self.opacity
            .start(Tween::new(0.0, 1.0, self.open_duration, easing));
        self.scale
            .start(Tween::new(0.0, 1.0, self.open_duration, easing));
        presenter.show(overlay);
        debug!(%overlay, "overlay opening");
        true
    }

    /// Start closing the active overlay, fading from its current opacity.
    ///
    /// Interrupts an opening animation. A no-op when closed or already closing.
    pub fn close(&mut self) -> bool {
        let overlay = match self.phase {
            OverlayPhase::Opening(id) | OverlayPhase::Open(id) => id,
            OverlayPhase::Closed | OverlayPhase::Closing(_) => return false,
        };

        self.phase = OverlayPhase::Closing(overlay);
        self.scale.cancel();
        self.opacity.start(Tween::new(
            self.visual.opacity,
            0.0,
            self.close_duration,
            Easing::Power2Out,
        ));
        debug!(%overlay, "overlay closing");
        true
    }

    /// Step the animations; reports when an opening or closing completes.
    pub fn advance(
        &mut self,
        dt: f32,
        presenter: &mut dyn OverlayPresenter,
    ) -> Option<OverlayEvent> {
        let overlay = self.phase.overlay()?;

        let mut animated = false;
        if let Some(step) = self.opacity.advance(dt) {
            self.visual.opacity = step.value.clamp(0.0, 1.0);
            animated = true;
        }
        if let Some(step) = self.scale.advance(dt) {
            self.visual.scale = step.value.max(0.0);
            animated = true;
        }
        if animated {
            presenter.present(overlay, self.visual);
        }

        if self.opacity.is_active() || self.scale.is_active() {
            return None;
        }

        match self.phase {
            OverlayPhase::Opening(id) => {
                self.phase = OverlayPhase::Open(id);
                debug!(overlay = %id, "overlay open");
                Some(OverlayEvent::Opened(id))
            }
            OverlayPhase::Closing(id) => {
                self.phase = OverlayPhase::Closed;
                self.visual = OverlayVisual::HIDDEN;
                presenter.hide(id);
                debug!(overlay = %id, "overlay closed");
                Some(OverlayEvent::Closed(id))
            }
            OverlayPhase::Open(_) | OverlayPhase::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        presented: Vec<OverlayVisual>,
    }

    impl OverlayPresenter for Recorder {
        fn show(&mut self, overlay: OverlayId) {
            self.calls.push(format!("show:{overlay}"));
        }

        fn present(&mut self, _overlay: OverlayId, visual: OverlayVisual) {
            self.presented.push(visual);
        }

        fn hide(&mut self, overlay: OverlayId) {
            self.calls.push(format!("hide:{overlay}"));
        }
    }

    fn run(machine: &mut OverlayMachine, presenter: &mut Recorder, frames: usize) -> Vec<OverlayEvent> {
        (0..frames)
            .filter_map(|_| machine.advance(1.0 / 60.0, presenter))
            .collect()
    }

    #[test]
    fn full_cycle() {
        let mut machine = OverlayMachine::new(0.5, 0.2);
        let mut presenter = Recorder::default();

        assert!(machine.open(OverlayId::Projects, &mut presenter));
        assert_eq!(machine.phase(), OverlayPhase::Opening(OverlayId::Projects));

        let events = run(&mut machine, &mut presenter, 40);
        assert_eq!(events, vec![OverlayEvent::Opened(OverlayId::Projects)]);
        assert_eq!(machine.visual().opacity, 1.0);
        assert_eq!(machine.visual().scale, 1.0);

        assert!(machine.close());
        let events = run(&mut machine, &mut presenter, 20);
        assert_eq!(events, vec![OverlayEvent::Closed(OverlayId::Projects)]);
        assert!(machine.is_closed());
        assert_eq!(presenter.calls, vec!["show:projects", "hide:projects"]);
    }

    #[test]
    fn open_is_rejected_unless_closed() {
        let mut machine = OverlayMachine::new(0.5, 0.2);
        let mut presenter = Recorder::default();
        assert!(machine.open(OverlayId::Projects, &mut presenter));
        assert!(!machine.open(OverlayId::Contact, &mut presenter));
        run(&mut machine, &mut presenter, 40);
        assert!(!machine.open(OverlayId::Projects, &mut presenter));
        assert_eq!(machine.phase(), OverlayPhase::Open(OverlayId::Projects));
        assert_eq!(presenter.calls, vec!["show:projects"]);
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        let mut machine = OverlayMachine::new(0.5, 0.2);
        let mut presenter = Recorder::default();
        assert!(!machine.close());
        assert_eq!(machine.advance(0.1, &mut presenter), None);
        assert_eq!(machine.phase(), OverlayPhase::Closed);
        assert!(presenter.calls.is_empty());
    }

    #[test]
    fn interrupted_opening_still_closes() {
        let mut machine = OverlayMachine::new(0.5, 0.2);
        let mut presenter = Recorder::default();
        machine.open(OverlayId::About, &mut presenter);
        run(&mut machine, &mut presenter, 5);

        assert!(machine.close());
        assert!(!machine.close());
        let events = run(&mut machine, &mut presenter, 20);
        assert_eq!(events, vec![OverlayEvent::Closed(OverlayId::About)]);
        assert!(machine.is_closed());
    }

    #[test]
    fn steady_open_overlay_is_not_re_presented() {
        let mut machine = OverlayMachine::new(0.5, 0.2);
        let mut presenter = Recorder::default();
        machine.open(OverlayId::Work, &mut presenter);

        run(&mut machine, &mut presenter, 40);
        assert_eq!(machine.phase(), OverlayPhase::Open(OverlayId::Work));
        let animated = presenter.presented.len();
        assert!((30..=31).contains(&animated));
        assert_eq!(presenter.presented.last().map(|v| v.opacity), Some(1.0));

        run(&mut machine, &mut presenter, 60);
        assert_eq!(presenter.presented.len(), animated);

        machine.close();
        run(&mut machine, &mut presenter, 20);
        assert!(presenter.presented.len() > animated);
    }
}

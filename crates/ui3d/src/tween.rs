//! Frame-stepped interpolations with cancellation.
//!
//! A [`TweenSlot`] owns the animation of one property. Starting a new tween on
//! a slot cancels whatever was running there, so two animations can never fight
//! over the same value. Slots are advanced once per frame by their owner.

use glam::Vec3;

/// Easing curves used by hover and overlay transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoots past the target by `overshoot` before settling
    BackOut(f32),
    /// Quadratic ease-out
    Power2Out,
    /// Cubic ease-out
    CubicOut,
}

impl Easing {
    /// Apply easing to a 0-1 parameter
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Values that can be interpolated.
pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// A single interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress in 0..=1
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current value. A finished tween yields `to` exactly.
    pub fn sample(&self) -> T {
        if self.is_finished() {
            self.to
        } else {
            self.from.lerp_to(self.to, self.easing.apply(self.progress()))
        }
    }

    /// Step forward by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed += dt.max(0.0);
        self.sample()
    }

    pub fn target(&self) -> T {
        self.to
    }
}

/// Identifies one tween started on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenToken(u64);

/// Result of stepping a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep<T> {
    pub value: T,
    pub finished: bool,
    pub token: TweenToken,
}

/// Animation slot for one property; at most one tween runs at a time.
#[derive(Debug, Clone)]
pub struct TweenSlot<T> {
    active: Option<Tween<T>>,
    generation: u64,
}

impl<T> Default for TweenSlot<T> {
    fn default() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }
}

impl<T: Lerp> TweenSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, cancelling any tween already running on this slot.
    pub fn start(&mut self, tween: Tween<T>) -> TweenToken {
        self.generation += 1;
        self.active = Some(tween);
        TweenToken(self.generation)
    }

    /// Cancel the running tween; returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `token` still names the running tween.
    pub fn is_current(&self, token: TweenToken) -> bool {
        self.active.is_some() && token.0 == self.generation
    }

    /// Current value of the running tween without stepping it.
    pub fn value(&self) -> Option<T> {
        self.active.as_ref().map(Tween::sample)
    }

    /// Step the running tween. The slot empties once the tween finishes.
    pub fn advance(&mut self, dt: f32) -> Option<TweenStep<T>> {
        let tween = self.active.as_mut()?;
        let value = tween.advance(dt);
        let finished = tween.is_finished();
        let token = TweenToken(self.generation);
        if finished {
            self.active = None;
        }
        Some(TweenStep {
            value,
            finished,
            token,
        })
    }
}

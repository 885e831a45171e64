//! Finite-time actions.
//!
//! A finite-time action accumulates the `dt` of each step and finishes once
//! its elapsed time reaches its duration. Progress is reported as a
//! normalized `t` in `[0, 1]`.

use std::fmt;

use action_scheduler::{Action, ActionContext, Target};

use crate::Easing;

/// Elapsed-time bookkeeping shared by the finite-time actions.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Clock {
    duration: f32,
    elapsed: f32,
    ticked: bool,
}

impl Clock {
    fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            ticked: false,
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.ticked = false;
    }

    /// Advances by `dt` and returns the new linear progress.
    fn advance(&mut self, dt: f32) -> f32 {
        self.ticked = true;
        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Zero-duration clocks still need one step to finish.
    fn is_done(&self) -> bool {
        self.ticked && self.elapsed >= self.duration
    }
}

type Apply<T> = Box<dyn FnMut(&T, f32)>;

/// Applies eased progress to its target over `duration` seconds.
///
/// The closure receives the target and the eased progress. It is called
/// once per step, and the last call always sees `t == 1`.
pub struct Interval<T: Target> {
    clock: Clock,
    easing: Easing,
    target: Option<T>,
    apply: Apply<T>,
}

impl<T: Target> Interval<T> {
    pub fn new(duration: f32, apply: impl FnMut(&T, f32) + 'static) -> Self {
        Self {
            clock: Clock::new(duration),
            easing: Easing::Linear,
            target: None,
            apply: Box::new(apply),
        }
    }

    /// Shapes the progress passed to the closure.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> f32 {
        self.clock.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed
    }
}

impl<T: Target> Action<T> for Interval<T> {
    fn start(&mut self, target: &T) {
        self.clock.reset();
        self.target = Some(target.clone());
    }

    fn step(&mut self, dt: f32, _cx: &ActionContext<'_, T>) {
        let t = self.easing.apply(self.clock.advance(dt));
        if let Some(target) = self.target.as_ref() {
            (self.apply)(target, t);
        }
    }

    fn is_done(&self) -> bool {
        self.clock.is_done()
    }
}

impl<T: Target> fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval")
            .field("clock", &self.clock)
            .field("easing", &self.easing)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Waits for `duration` seconds without touching its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DelayTime {
    clock: Clock,
}

impl DelayTime {
    pub fn new(duration: f32) -> Self {
        Self {
            clock: Clock::new(duration),
        }
    }

    pub fn duration(&self) -> f32 {
        self.clock.duration
    }
}

impl<T: Target> Action<T> for DelayTime {
    fn start(&mut self, _target: &T) {
        self.clock.reset();
    }

    fn step(&mut self, dt: f32, _cx: &ActionContext<'_, T>) {
        self.clock.advance(dt);
    }

    fn is_done(&self) -> bool {
        self.clock.is_done()
    }
}

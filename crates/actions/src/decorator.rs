//! Decorator actions.
//!
//! Decorators wrap a single child action and change how often or how fast it
//! runs, or how the scheduler sees it. This module provides [`Repeat`],
//! [`RepeatForever`], [`Speed`] and [`Tagged`].

use action_scheduler::{Action, ActionContext, ActionFlags, ActionTag, Target};
use tracing::trace;

use crate::BoxedAction;

/// Runs its child a fixed number of times.
///
/// # Semantics
///
/// Each time the child reports done it is stopped and, while runs remain,
/// restarted on the same target. The next run begins on the following step.
/// `Repeat::new(child, 0)` is done before its first step and never steps
/// the child.
pub struct Repeat<T: Target> {
    child: BoxedAction<T>,
    times: u32,
    completed: u32,
}

impl<T: Target> Repeat<T> {
    pub fn new(child: BoxedAction<T>, times: u32) -> Self {
        Self {
            child,
            times,
            completed: 0,
        }
    }

    /// Number of runs finished so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl<T: Target> Action<T> for Repeat<T> {
    fn start(&mut self, target: &T) {
        self.completed = 0;
        if self.times > 0 {
            self.child.start(target);
        }
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        if self.is_done() {
            return;
        }
        self.child.step(dt, cx);
        if !self.child.is_done() {
            return;
        }
        self.child.stop();
        self.completed += 1;
        if self.completed < self.times {
            trace!(
                target: "actions::repeat",
                action = %cx.id(),
                run = self.completed,
                of = self.times,
                "repeat restarted"
            );
            self.child.start(cx.target());
        }
    }

    fn is_done(&self) -> bool {
        self.completed >= self.times
    }
}

/// Restarts its child every time it finishes. Never reports done.
pub struct RepeatForever<T: Target> {
    child: BoxedAction<T>,
}

impl<T: Target> RepeatForever<T> {
    pub fn new(child: BoxedAction<T>) -> Self {
        Self { child }
    }
}

impl<T: Target> Action<T> for RepeatForever<T> {
    fn start(&mut self, target: &T) {
        self.child.start(target);
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        self.child.step(dt, cx);
        if self.child.is_done() {
            self.child.stop();
            self.child.start(cx.target());
        }
    }

    fn is_done(&self) -> bool {
        false
    }
}

/// Scales the time its child sees.
///
/// A rate of 2 runs the child twice as fast; a rate of 0 freezes it.
/// Negative rates are treated as 0.
pub struct Speed<T: Target> {
    child: BoxedAction<T>,
    rate: f32,
}

impl<T: Target> Speed<T> {
    pub fn new(child: BoxedAction<T>, rate: f32) -> Self {
        Self {
            child,
            rate: rate.max(0.0),
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }
}

impl<T: Target> Action<T> for Speed<T> {
    fn start(&mut self, target: &T) {
        self.child.start(target);
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        self.child.step(dt * self.rate, cx);
    }

    fn is_done(&self) -> bool {
        self.child.is_done()
    }

    fn stop(&mut self) {
        self.child.stop();
    }
}

/// Attaches a tag and flags to any action.
///
/// The wrapped action runs unchanged; only the identity the scheduler uses
/// for tag and flag based lookup and removal is replaced.
pub struct Tagged<A> {
    inner: A,
    tag: ActionTag,
    flags: ActionFlags,
}

impl<A> Tagged<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            tag: ActionTag::INVALID,
            flags: ActionFlags::empty(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<ActionTag>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_flags(mut self, flags: ActionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<T: Target, A: Action<T>> Action<T> for Tagged<A> {
    #[inline]
    fn start(&mut self, target: &T) {
        self.inner.start(target);
    }

    #[inline]
    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        self.inner.step(dt, cx);
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    #[inline]
    fn stop(&mut self) {
        self.inner.stop();
    }

    fn tag(&self) -> ActionTag {
        self.tag
    }

    fn flags(&self) -> ActionFlags {
        self.flags
    }
}

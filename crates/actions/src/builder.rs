//! Builder utilities for ergonomic action construction.
//!
//! Instead of writing `Box::new(Sequence::new(vec![...]))`, use
//! `sequence(vec![...])`.

use action_scheduler::{ActionContext, ActionTag, Target};

use crate::{
    BoxedAction, CallFunc, DelayTime, Easing, Interval, Repeat, RepeatForever, Sequence, Spawn,
    Speed, Tagged,
};

/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<T: Target>(children: Vec<BoxedAction<T>>) -> BoxedAction<T> {
    Box::new(Sequence::new(children))
}

/// Shorthand for `Box::new(Spawn::new(children))`.
#[inline]
pub fn spawn<T: Target>(children: Vec<BoxedAction<T>>) -> BoxedAction<T> {
    Box::new(Spawn::new(children))
}

/// Shorthand for `Box::new(Repeat::new(child, times))`.
#[inline]
pub fn repeat<T: Target>(child: BoxedAction<T>, times: u32) -> BoxedAction<T> {
    Box::new(Repeat::new(child, times))
}

/// Shorthand for `Box::new(RepeatForever::new(child))`.
#[inline]
pub fn repeat_forever<T: Target>(child: BoxedAction<T>) -> BoxedAction<T> {
    Box::new(RepeatForever::new(child))
}

/// Shorthand for `Box::new(Speed::new(child, rate))`.
#[inline]
pub fn speed<T: Target>(child: BoxedAction<T>, rate: f32) -> BoxedAction<T> {
    Box::new(Speed::new(child, rate))
}

/// Shorthand for `Box::new(DelayTime::new(duration))`.
#[inline]
pub fn delay<T: Target>(duration: f32) -> BoxedAction<T> {
    Box::new(DelayTime::new(duration))
}

/// Shorthand for `Box::new(CallFunc::new(callback))`.
#[inline]
pub fn call<T: Target>(callback: impl FnMut(&ActionContext<'_, T>) + 'static) -> BoxedAction<T> {
    Box::new(CallFunc::new(callback))
}

/// Linear [`Interval`] over `duration` seconds.
#[inline]
pub fn interval<T: Target>(duration: f32, apply: impl FnMut(&T, f32) + 'static) -> BoxedAction<T> {
    Box::new(Interval::new(duration, apply))
}

/// Eased [`Interval`] over `duration` seconds.
#[inline]
pub fn eased<T: Target>(
    duration: f32,
    easing: Easing,
    apply: impl FnMut(&T, f32) + 'static,
) -> BoxedAction<T> {
    Box::new(Interval::new(duration, apply).with_easing(easing))
}

/// Shorthand for `Box::new(Tagged::new(action).with_tag(tag))`.
#[inline]
pub fn tagged<T: Target>(tag: impl Into<ActionTag>, action: BoxedAction<T>) -> BoxedAction<T> {
    Box::new(Tagged::new(action).with_tag(tag))
}

//! Reusable building blocks for [`action_scheduler`].
//!
//! Every type here implements [`Action`] and is scheduled like any other
//! action. Composites and decorators are opaque to the scheduler: a sequence
//! of ten moves counts as one running action.
//!
//! # Architecture
//!
//! - Finite-time actions: [`Interval`], [`DelayTime`], shaped by an [`Easing`]
//! - Instant actions: [`CallFunc`]
//! - Composite actions: [`Sequence`], [`Spawn`]
//! - Decorator actions: [`Repeat`], [`RepeatForever`], [`Speed`], [`Tagged`]
//! - [`builder`] shorthands returning boxed actions
//!
//! A child that finishes inside a composite is stopped right away, and the
//! next child is started and given a zero-length step in the same frame, so
//! instant actions chained in a sequence all fire in one frame.

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod easing;
pub mod instant;
pub mod interval;

pub use action_scheduler::{Action, ActionContext};
pub use composite::{Sequence, Spawn};
pub use decorator::{Repeat, RepeatForever, Speed, Tagged};
pub use easing::Easing;
pub use instant::CallFunc;
pub use interval::{DelayTime, Interval};

/// Boxed action, as taken by composites and returned by the builders.
pub type BoxedAction<T> = Box<dyn Action<T>>;

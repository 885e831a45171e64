//! Action capability and identity types.
//!
//! This module defines the [`Action`] trait, the state machine the scheduler
//! drives one tick per frame, together with the identifiers used to find
//! actions again: [`ActionId`] (per-instance identity), [`ActionTag`] and
//! [`ActionFlags`] (programmer-assigned, used for bulk lookup and removal).

use core::fmt;
use core::hash::Hash;

use bitflags::bitflags;

use crate::manager::ActionManager;

/// Identity of an object that actions are bound to.
///
/// The scheduler keys its registry by a clone of the target and never owns
/// whatever the target refers to. Any cheap, stable handle works: a node id,
/// an interned name, or a pointer-identity wrapper around a shared node.
pub trait Target: Clone + Eq + Hash + fmt::Debug + 'static {}

impl<T> Target for T where T: Clone + Eq + Hash + fmt::Debug + 'static {}

/// Identifier handed out by [`ActionManager::add_action`].
///
/// Ids are unique per manager and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub(crate) u64);

impl ActionId {
    /// Returns the raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Programmer-assigned action tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTag(pub i32);

impl ActionTag {
    /// Tag carried by actions that were never tagged.
    pub const INVALID: Self = Self(-1);

    /// Returns true unless this is [`ActionTag::INVALID`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for ActionTag {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<i32> for ActionTag {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Bit set used to classify actions for bulk removal.
    ///
    /// The named bits cover the common node properties an action animates.
    /// Any other bit is free for application use and survives every set
    /// operation unchanged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u32 {
        const POSITION   = 1 << 0;
        const ROTATION   = 1 << 1;
        const SCALE      = 1 << 2;
        const VISIBILITY = 1 << 3;
        const COLOR      = 1 << 4;

        const _ = !0;
    }
}

/// A time-based state machine bound to a target.
///
/// The scheduler calls [`start`](Action::start) once when the action is
/// added, then [`step`](Action::step) once per unpaused frame until
/// [`is_done`](Action::is_done) reports true, at which point it calls
/// [`stop`](Action::stop) and drops the action. An action removed explicitly
/// is dropped without `stop`.
///
/// Composite actions are opaque to the scheduler: a sequence of several
/// moves is one action.
pub trait Action<T: Target> {
    /// Binds the action to its target. Called exactly once, before the first step.
    fn start(&mut self, target: &T);

    /// Advances the action by `dt` seconds.
    ///
    /// `cx` exposes the owning manager so a step may add, remove, query, or
    /// pause actions on any target, itself included.
    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>);

    /// Returns true once the action has nothing left to do.
    fn is_done(&self) -> bool;

    /// Called once when the action retires by completing.
    fn stop(&mut self) {}

    /// Tag used by the tag-based lookup and removal API.
    fn tag(&self) -> ActionTag {
        ActionTag::INVALID
    }

    /// Flags used by [`ActionManager::remove_actions_by_flags`].
    fn flags(&self) -> ActionFlags {
        ActionFlags::empty()
    }
}

/// Blanket implementation for boxed actions.
///
/// This allows `Box<dyn Action<T>>` to be scheduled or nested inside
/// composites like any concrete action.
impl<T: Target> Action<T> for Box<dyn Action<T>> {
    #[inline]
    fn start(&mut self, target: &T) {
        (**self).start(target)
    }

    #[inline]
    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        (**self).step(dt, cx)
    }

    #[inline]
    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop()
    }

    #[inline]
    fn tag(&self) -> ActionTag {
        (**self).tag()
    }

    #[inline]
    fn flags(&self) -> ActionFlags {
        (**self).flags()
    }
}

/// What a stepping action can see of the scheduler.
pub struct ActionContext<'a, T: Target> {
    manager: &'a ActionManager<T>,
    target: &'a T,
    id: ActionId,
}

impl<'a, T: Target> ActionContext<'a, T> {
    pub(crate) fn new(manager: &'a ActionManager<T>, target: &'a T, id: ActionId) -> Self {
        Self {
            manager,
            target,
            id,
        }
    }

    /// The manager running this step.
    #[inline]
    pub fn manager(&self) -> &'a ActionManager<T> {
        self.manager
    }

    /// The target the running action is bound to.
    #[inline]
    pub fn target(&self) -> &'a T {
        self.target
    }

    /// Id of the top-level action being stepped.
    #[inline]
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Removes the running top-level action from its target.
    ///
    /// The action finishes its current step normally and is dropped once the
    /// step returns; it is never stepped again.
    pub fn remove_self(&self) -> bool {
        self.manager.remove_action(self.id)
    }
}

impl<T: Target> fmt::Debug for ActionContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("target", self.target)
            .field("id", &self.id)
            .finish()
    }
}

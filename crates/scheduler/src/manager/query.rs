//! Read-only lookups and counts.
//!
//! Counts are over top-level actions only: a sequence of seven steps is one
//! running action. An action that is mid-step still counts, and can be found
//! by tag, but cannot be inspected until its step returns.

use super::ActionManager;
use crate::action::{Action, ActionId, ActionTag, Target};

impl<T: Target> ActionManager<T> {
    /// Id of the first action of `target` carrying `tag`.
    pub fn action_by_tag(&self, tag: ActionTag, target: &T) -> Option<ActionId> {
        if !tag.is_valid() {
            return None;
        }
        let state = self.state.borrow();
        let handle = state.targets.get(target)?;
        handle
            .position_by_tag(tag)
            .map(|index| handle.slots[index].id)
    }

    /// Target `id` is scheduled on, if it is still scheduled.
    pub fn target_of(&self, id: ActionId) -> Option<T> {
        self.state.borrow().targets.owner(id).cloned()
    }

    /// Runs `f` against a scheduled action.
    ///
    /// Returns `None` if the action is not scheduled or is currently stepping.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls a mutating method of this manager.
    pub fn with_action<R>(&self, id: ActionId, f: impl FnOnce(&dyn Action<T>) -> R) -> Option<R> {
        let state = self.state.borrow();
        let target = state.targets.owner(id)?;
        let handle = state.targets.get(target)?;
        let slot = &handle.slots[handle.position(id)?];
        slot.action.as_ref().map(|action| f(action.as_ref()))
    }

    /// Runs `f` against the first action of `target` carrying `tag`.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls a mutating method of this manager.
    pub fn with_action_by_tag<R>(
        &self,
        tag: ActionTag,
        target: &T,
        f: impl FnOnce(&dyn Action<T>) -> R,
    ) -> Option<R> {
        let id = self.action_by_tag(tag, target)?;
        self.with_action(id, f)
    }

    /// Number of actions scheduled on `target`, paused or not.
    pub fn number_of_running_actions_in_target(&self, target: &T) -> usize {
        self.state
            .borrow()
            .targets
            .get(target)
            .map_or(0, |handle| handle.len())
    }

    /// Number of actions scheduled on all targets.
    pub fn number_of_running_actions(&self) -> usize {
        self.state.borrow().targets.action_count()
    }

    /// Number of actions on `target` carrying `tag`.
    pub fn number_of_running_actions_in_target_by_tag(&self, target: &T, tag: ActionTag) -> usize {
        if !tag.is_valid() {
            return 0;
        }
        self.state
            .borrow()
            .targets
            .get(target)
            .map_or(0, |handle| handle.count_by_tag(tag))
    }

    /// Whether `target` currently has a handle.
    pub fn has_target(&self, target: &T) -> bool {
        self.state.borrow().targets.get(target).is_some()
    }

    /// Pause state of `target`, or `None` if it has no handle.
    pub fn is_target_paused(&self, target: &T) -> Option<bool> {
        self.state
            .borrow()
            .targets
            .get(target)
            .map(|handle| handle.paused)
    }

    /// Number of targets with a handle.
    pub fn target_count(&self) -> usize {
        self.state.borrow().targets.len()
    }

    /// Targets with a handle, in registration order.
    pub fn targets(&self) -> Vec<T> {
        self.state.borrow().targets.snapshot()
    }
}

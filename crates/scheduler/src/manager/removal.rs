//! Explicit removal of scheduled actions.
//!
//! Removing an action that is not stepping drops it immediately. Removing the
//! action that is currently stepping detaches it from its list at once and
//! leaves the drop to the update loop (see the salvage notes on
//! [`ActionManager`]). A target whose list becomes empty loses its handle,
//! unless the update loop is scanning that target, in which case the handle
//! is erased when the scan of that target ends.

use tracing::debug;

use super::ActionManager;
use crate::action::{ActionFlags, ActionId, ActionTag, Target};

impl<T: Target> ActionManager<T> {
    /// Removes one action by id. Returns false if it is not scheduled.
    pub fn remove_action(&self, id: ActionId) -> bool {
        let removed = self.mutate(|state, detached| {
            let Some(target) = state.targets.owner(id).cloned() else {
                return;
            };
            if let Some(index) = state.targets.get(&target).and_then(|h| h.position(id)) {
                state.detach_at(&target, index, detached);
            }
        });

        if removed == 0 {
            debug!(target: "scheduler::manager", action = %id, "remove_action: action not scheduled");
        }
        removed > 0
    }

    /// Removes the first action of `target` carrying `tag`.
    ///
    /// Returns false if there is none, or if `tag` is [`ActionTag::INVALID`].
    pub fn remove_action_by_tag(&self, tag: ActionTag, target: &T) -> bool {
        if !tag.is_valid() {
            debug!(target: "scheduler::manager", target_id = ?target, "remove_action_by_tag: invalid tag");
            return false;
        }

        self.mutate(|state, detached| {
            if let Some(index) = state.targets.get(target).and_then(|h| h.position_by_tag(tag)) {
                state.detach_at(target, index, detached);
            }
        }) > 0
    }

    /// Removes every action of `target` carrying `tag` and returns how many.
    pub fn remove_all_actions_by_tag(&self, tag: ActionTag, target: &T) -> usize {
        if !tag.is_valid() {
            debug!(target: "scheduler::manager", target_id = ?target, "remove_all_actions_by_tag: invalid tag");
            return 0;
        }

        self.remove_matching(target, |slot_tag, _| slot_tag == tag)
    }

    /// Removes every action of `target` sharing at least one bit with `flags`
    /// and returns how many.
    pub fn remove_actions_by_flags(&self, flags: ActionFlags, target: &T) -> usize {
        if flags.is_empty() {
            return 0;
        }

        self.remove_matching(target, |_, slot_flags| slot_flags.intersects(flags))
    }

    /// Removes every action of `target` and returns how many.
    pub fn remove_all_actions_from_target(&self, target: &T) -> usize {
        self.mutate(|state, detached| state.detach_all(target, detached))
    }

    /// Removes every action of every target and returns how many.
    pub fn remove_all_actions(&self) -> usize {
        self.mutate(|state, detached| {
            for target in state.targets.snapshot() {
                state.detach_all(&target, detached);
            }
        })
    }

    fn remove_matching(
        &self,
        target: &T,
        matches: impl Fn(ActionTag, ActionFlags) -> bool,
    ) -> usize {
        self.mutate(|state, detached| {
            let mut index = 0;
            loop {
                let Some(handle) = state.targets.get(target) else {
                    break;
                };
                let Some(slot) = handle.slots.get(index) else {
                    break;
                };
                if matches(slot.tag, slot.flags) {
                    state.detach_at(target, index, detached);
                } else {
                    index += 1;
                }
            }
        })
    }
}

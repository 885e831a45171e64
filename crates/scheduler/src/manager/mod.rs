//! The action scheduler.
//!
//! [`ActionManager`] owns the target registry and exposes the whole action
//! API through `&self`, so that a stepping action can call back into it.
//! The registry lives behind a `RefCell` and is never borrowed while action
//! code runs: an action is checked out of its slot for the duration of its
//! own step and checked back in afterwards.
//!
//! # Salvage
//!
//! When a step removes the action that is currently stepping (directly, or by
//! clearing its target), the slot leaves the list at once and the handle is
//! marked salvaged. The update loop, which still holds the checked-out box,
//! sees the mark when the step returns and drops the action there, exactly
//! once, without touching the list again. Emptying the target that is being
//! scanned likewise defers erasing its handle until the scan of that target
//! ends.
//!
//! The API is split by concern:
//! - this module: construction, [`add_action`](ActionManager::add_action), [`update`](ActionManager::update), [`validate`](ActionManager::validate)
//! - `removal`: the `remove_*` family
//! - `query`: read-only lookups and counts
//! - `pause`: pause and resume

mod pause;
mod query;
mod removal;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::action::{Action, ActionContext, ActionId, Target};
use crate::config::SchedulerConfig;
use crate::error::InvariantViolation;
use crate::handle::{ActionHandle, Slot};
use crate::registry::TargetRegistry;

/// Scheduler driving every action bound to targets of type `T`.
///
/// Strictly single-threaded: the manager is neither `Send` nor `Sync`, and
/// all stepping happens synchronously inside [`update`](Self::update).
pub struct ActionManager<T: Target> {
    config: SchedulerConfig,
    state: RefCell<SchedulerState<T>>,
    next_id: Cell<u64>,
}

/// Registry plus the scan state of the update in progress.
struct SchedulerState<T: Target> {
    targets: TargetRegistry<T>,
    /// Target whose list the update loop is scanning.
    current_target: Option<T>,
    /// The scanned target's list emptied during the scan; erase its handle
    /// once the scan of that target ends.
    current_target_salvaged: bool,
    updating: bool,
}

/// Actions a mutation detached from the registry.
///
/// Detached actions are dropped only after the registry borrow is released,
/// since an action's `Drop` is free to call back into the manager.
struct Detached<T: Target> {
    slots: Vec<Slot<T>>,
}

impl<T: Target> Detached<T> {
    fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn count(&self) -> usize {
        self.slots.len()
    }
}

impl<T: Target> SchedulerState<T> {
    fn is_scanning(&self, target: &T) -> bool {
        self.current_target.as_ref() == Some(target)
    }

    /// Detaches the slot at `index` of `target`'s list.
    fn detach_at(&mut self, target: &T, index: usize, detached: &mut Detached<T>) {
        if let Some(slot) = self.targets.remove_at(target, index) {
            trace!(
                target: "scheduler::manager",
                target_id = ?target,
                action = %slot.id,
                "action detached"
            );
            detached.slots.push(slot);
            self.retire_if_empty(target);
        }
    }

    /// Detaches every slot of `target`'s list.
    fn detach_all(&mut self, target: &T, detached: &mut Detached<T>) {
        if self.targets.get(target).is_none() {
            return;
        }
        detached.slots.extend(self.targets.clear(target));
        self.retire_if_empty(target);
    }

    /// Erases an empty handle, or defers the erase while its target is scanned.
    fn retire_if_empty(&mut self, target: &T) {
        if !self.targets.get(target).is_some_and(ActionHandle::is_empty) {
            return;
        }
        if self.is_scanning(target) {
            self.current_target_salvaged = true;
        } else {
            self.targets.erase(target);
        }
    }
}

impl<T: Target> ActionManager<T> {
    /// Creates an empty manager with default capacities.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Creates an empty manager with the given capacities.
    pub fn with_config(config: SchedulerConfig) -> Self {
        let targets = TargetRegistry::with_capacity(config.target_capacity);
        Self {
            config,
            state: RefCell::new(SchedulerState {
                targets,
                current_target: None,
                current_target_salvaged: false,
                updating: false,
            }),
            next_id: Cell::new(0),
        }
    }

    /// Returns the configuration this manager was built with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules `action` on `target` and returns its id.
    ///
    /// The target's handle is created on first use with the given `paused`
    /// state; an existing handle keeps its pause state. The action is started
    /// right away and receives its first step on the next update in which its
    /// target is unpaused (or later in the current update, when added to a
    /// target the running update has not finished scanning).
    pub fn add_action(
        &self,
        mut action: impl Action<T> + 'static,
        target: &T,
        paused: bool,
    ) -> ActionId {
        action.start(target);

        let id = ActionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let slot = Slot::new(id, Box::new(action));

        let mut state = self.state.borrow_mut();
        state.targets.get_or_insert(target, paused);
        state
            .targets
            .push(target, slot, self.config.action_capacity);

        trace!(
            target: "scheduler::manager",
            target_id = ?target,
            action = %id,
            "action added"
        );
        id
    }

    /// Steps every action of every unpaused target once.
    ///
    /// Targets are visited in registration order and each target's actions in
    /// insertion order. Actions that report done after their step are stopped
    /// and dropped in the same frame. Calling `update` from inside a step is
    /// ignored.
    pub fn update(&self, dt: f32) {
        let targets = {
            let mut state = self.state.borrow_mut();
            if state.updating {
                warn!(
                    target: "scheduler::manager",
                    "update called from inside a step, ignoring"
                );
                return;
            }
            state.updating = true;
            state.targets.entries()
        };

        let guard = UpdateGuard { state: &self.state };
        for (target, seq) in &targets {
            self.scan_target(target, *seq, dt);
        }
        drop(guard);

        #[cfg(debug_assertions)]
        if let Err(violation) = self.validate() {
            panic!("scheduler invariant violated after update: {violation}");
        }
    }

    /// Steps the actions of one target, if it is still registered and unpaused.
    ///
    /// A handle erased and re-created since the frame began is left for the
    /// next frame.
    fn scan_target(&self, target: &T, seq: u64, dt: f32) {
        {
            let mut state = self.state.borrow_mut();
            let Some(handle) = state.targets.get_mut(target) else {
                return;
            };
            if handle.paused || handle.seq != seq {
                return;
            }
            handle.next = 0;
            state.current_target = Some(target.clone());
            state.current_target_salvaged = false;
        }

        while let Some((id, mut action)) = self.check_out(target) {
            action.step(dt, &ActionContext::new(self, target, id));
            self.check_in(target, id, action);
        }

        {
            let mut state = self.state.borrow_mut();
            state.current_target = None;
            let salvaged = std::mem::take(&mut state.current_target_salvaged);
            let emptied = state.targets.get(target).is_some_and(ActionHandle::is_empty);
            if salvaged && emptied {
                state.targets.erase(target);
            }
        }
    }

    /// Takes the next action of the scanned target out of its slot.
    fn check_out(&self, target: &T) -> Option<(ActionId, Box<dyn Action<T>>)> {
        let mut state = self.state.borrow_mut();
        let handle = state.targets.get_mut(target)?;

        while handle.next < handle.len() {
            let index = handle.next;
            handle.next += 1;

            let slot = &mut handle.slots[index];
            if let Some(action) = slot.action.take() {
                let id = slot.id;
                handle.current = Some(id);
                handle.salvaged = false;
                return Some((id, action));
            }
        }
        None
    }

    /// Returns a stepped action to its slot, or retires it.
    fn check_in(&self, target: &T, id: ActionId, mut action: Box<dyn Action<T>>) {
        if self.end_step_if_salvaged(target) {
            debug!(
                target: "scheduler::salvage",
                target_id = ?target,
                action = %id,
                "dropping action removed during its own step"
            );
            drop(action);
            return;
        }

        if !action.is_done() {
            let tag = action.tag();
            let flags = action.flags();
            let mut state = self.state.borrow_mut();
            if let Some(handle) = state.targets.get_mut(target) {
                let index = handle.next - 1;
                debug_assert_eq!(handle.slots[index].id, id);
                let slot = &mut handle.slots[index];
                slot.tag = tag;
                slot.flags = flags;
                slot.action = Some(action);
                handle.current = None;
            }
            return;
        }

        // `stop` runs while the action is still current, so a removal it
        // triggers is salvaged like one made during the step.
        action.stop();

        let mut detached = Detached::new();
        let salvaged = {
            let mut state = self.state.borrow_mut();
            let index = match state.targets.get_mut(target) {
                Some(handle) if !handle.salvaged => {
                    handle.current = None;
                    Some(handle.next - 1)
                }
                _ => None,
            };
            match index {
                Some(index) => {
                    state.detach_at(target, index, &mut detached);
                    false
                }
                None => {
                    if let Some(handle) = state.targets.get_mut(target) {
                        handle.current = None;
                        handle.salvaged = false;
                    }
                    true
                }
            }
        };

        trace!(
            target: "scheduler::manager",
            target_id = ?target,
            action = %id,
            salvaged,
            "action completed"
        );
        drop(action);
        drop(detached);
    }

    /// Clears the current-action mark of `target`, reporting whether the
    /// action was salvaged during its step.
    fn end_step_if_salvaged(&self, target: &T) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(handle) = state.targets.get_mut(target) else {
            return true;
        };
        if handle.salvaged {
            handle.salvaged = false;
            handle.current = None;
            true
        } else {
            false
        }
    }

    /// Checks the registry's internal invariants.
    ///
    /// Runs automatically after every update in debug builds. A violation is
    /// a scheduler bug.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let state = self.state.borrow();
        let mut seen = HashSet::new();
        let mut listed = 0;

        for (target, handle) in state.targets.iter() {
            let name = || format!("{target:?}");

            if handle.salvaged {
                let Some(current) = handle.current else {
                    return Err(InvariantViolation::SalvagedWithoutCurrent { target: name() });
                };
                if handle.position(current).is_some() {
                    return Err(InvariantViolation::SalvagedStillListed {
                        target: name(),
                        action: current,
                    });
                }
            }

            if handle.next > handle.len() {
                return Err(InvariantViolation::CursorOutOfRange {
                    target: name(),
                    next: handle.next,
                    len: handle.len(),
                });
            }

            if !state.updating {
                if handle.is_empty() {
                    return Err(InvariantViolation::EmptyHandleRetained { target: name() });
                }
                if let Some(current) = handle.current {
                    return Err(InvariantViolation::StaleCurrentAction {
                        target: name(),
                        action: current,
                    });
                }
            }

            for slot in &handle.slots {
                if !seen.insert(slot.id) {
                    return Err(InvariantViolation::DuplicateActionId { action: slot.id });
                }
                if slot.action.is_none() && handle.current != Some(slot.id) {
                    return Err(InvariantViolation::MissingAction {
                        target: name(),
                        action: slot.id,
                    });
                }
                match state.targets.owner(slot.id) {
                    Some(owner) if owner == target => {}
                    other => {
                        return Err(InvariantViolation::OwnerMismatch {
                            action: slot.id,
                            listed: name(),
                            indexed: format!("{other:?}"),
                        });
                    }
                }
            }
            listed += handle.len();
        }

        let indexed = state.targets.action_count();
        if indexed != listed {
            return Err(InvariantViolation::IndexOutOfSync { indexed, listed });
        }
        Ok(())
    }

    /// Runs a registry mutation and drops whatever it detached afterwards.
    fn mutate(&self, f: impl FnOnce(&mut SchedulerState<T>, &mut Detached<T>)) -> usize {
        let mut detached = Detached::new();
        {
            let mut state = self.state.borrow_mut();
            f(&mut state, &mut detached);
        }
        let count = detached.count();
        drop(detached);
        count
    }
}

impl<T: Target> Default for ActionManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target> fmt::Debug for ActionManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ActionManager")
            .field("targets", &state.targets.len())
            .field("actions", &state.targets.action_count())
            .field("updating", &state.updating)
            .finish()
    }
}

/// Resets the scan state when an update ends, including by unwinding.
struct UpdateGuard<'a, T: Target> {
    state: &'a RefCell<SchedulerState<T>>,
}

impl<T: Target> Drop for UpdateGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.updating = false;
            state.current_target = None;
            state.current_target_salvaged = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::action::ActionTag;

    /// Done after a fixed number of steps; records every step in a shared log.
    struct Countdown {
        name: &'static str,
        left: u32,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Countdown {
        fn new(name: &'static str, left: u32, log: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self {
                name,
                left,
                log: Rc::clone(log),
            }
        }
    }

    impl Action<u32> for Countdown {
        fn start(&mut self, _target: &u32) {}

        fn step(&mut self, _dt: f32, _cx: &ActionContext<'_, u32>) {
            self.left -= 1;
            self.log.borrow_mut().push(self.name);
        }

        fn is_done(&self) -> bool {
            self.left == 0
        }
    }

    #[test]
    fn update_steps_in_insertion_order_and_retires_completed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager: ActionManager<u32> = ActionManager::new();
        manager.add_action(Countdown::new("a", 1, &log), &1, false);
        manager.add_action(Countdown::new("b", 2, &log), &1, false);
        manager.add_action(Countdown::new("c", 1, &log), &1, false);

        manager.update(0.1);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(manager.number_of_running_actions_in_target(&1), 1);

        manager.update(0.1);
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "b"]);
        assert!(!manager.has_target(&1));
    }

    #[test]
    fn nested_update_is_ignored() {
        struct Nested {
            steps: u32,
        }

        impl Action<u32> for Nested {
            fn start(&mut self, _target: &u32) {}
            fn step(&mut self, dt: f32, cx: &ActionContext<'_, u32>) {
                self.steps += 1;
                cx.manager().update(dt);
            }
            fn is_done(&self) -> bool {
                false
            }
            fn tag(&self) -> ActionTag {
                ActionTag(self.steps as i32)
            }
        }

        let manager: ActionManager<u32> = ActionManager::new();
        manager.add_action(Nested { steps: 0 }, &1, false);

        manager.update(0.1);
        manager.update(0.1);

        assert_eq!(manager.number_of_running_actions_in_target_by_tag(&1, ActionTag(2)), 1);
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn ids_are_never_reused() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager: ActionManager<u32> = ActionManager::new();

        let first = manager.add_action(Countdown::new("a", 1, &log), &1, false);
        manager.update(0.1);
        let second = manager.add_action(Countdown::new("b", 1, &log), &1, false);

        assert_ne!(first, second);
        assert!(second > first);
    }
}

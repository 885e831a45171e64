//! Pause and resume.
//!
//! A paused target is skipped by [`ActionManager::update`] entirely: its
//! actions receive no steps, so their notion of elapsed time stands still.
//! Pause state lives on the target's handle and disappears with it.

use tracing::debug;

use super::ActionManager;
use crate::action::Target;

impl<T: Target> ActionManager<T> {
    /// Pauses `target`. Returns false if it has no handle.
    pub fn pause_target(&self, target: &T) -> bool {
        self.set_paused(target, true)
    }

    /// Resumes `target`. Returns false if it has no handle.
    pub fn resume_target(&self, target: &T) -> bool {
        self.set_paused(target, false)
    }

    /// Pauses every unpaused target that has actions and returns exactly
    /// those targets, in registration order.
    ///
    /// Passing the result to [`resume_targets`](Self::resume_targets) undoes
    /// the pause without touching targets that were already paused.
    pub fn pause_all_running_actions(&self) -> Vec<T> {
        let mut state = self.state.borrow_mut();
        let running: Vec<T> = state
            .targets
            .iter()
            .filter(|(_, handle)| !handle.paused && !handle.is_empty())
            .map(|(target, _)| target.clone())
            .collect();

        for target in &running {
            if let Some(handle) = state.targets.get_mut(target) {
                handle.paused = true;
            }
        }

        debug!(target: "scheduler::manager", paused = running.len(), "paused all running targets");
        running
    }

    /// Resumes each of `targets`.
    pub fn resume_targets(&self, targets: &[T]) {
        for target in targets {
            self.resume_target(target);
        }
    }

    fn set_paused(&self, target: &T, paused: bool) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(handle) = state.targets.get_mut(target) else {
            debug!(target: "scheduler::manager", target_id = ?target, paused, "no handle for target");
            return false;
        };
        handle.paused = paused;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::action::{Action, ActionContext};
    use crate::manager::ActionManager;

    struct Ticks(Rc<Cell<u32>>);

    impl Action<&'static str> for Ticks {
        fn start(&mut self, _target: &&'static str) {}
        fn step(&mut self, _dt: f32, _cx: &ActionContext<'_, &'static str>) {
            self.0.set(self.0.get() + 1);
        }
        fn is_done(&self) -> bool {
            false
        }
    }

    #[test]
    fn paused_target_receives_no_steps() {
        let ticks = Rc::new(Cell::new(0));
        let manager = ActionManager::new();
        manager.add_action(Ticks(Rc::clone(&ticks)), &"node", false);

        assert!(manager.pause_target(&"node"));
        for _ in 0..5 {
            manager.update(0.1);
        }
        assert_eq!(ticks.get(), 0);

        assert!(manager.resume_target(&"node"));
        manager.update(0.1);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn pausing_unknown_target_is_ignored() {
        let manager: ActionManager<&'static str> = ActionManager::new();

        assert!(!manager.pause_target(&"ghost"));
        assert!(!manager.resume_target(&"ghost"));
        assert!(!manager.has_target(&"ghost"));
    }

    #[test]
    fn pause_all_skips_already_paused_targets() {
        let ticks = Rc::new(Cell::new(0));
        let manager = ActionManager::new();
        manager.add_action(Ticks(Rc::clone(&ticks)), &"a", false);
        manager.add_action(Ticks(Rc::clone(&ticks)), &"b", true);
        manager.add_action(Ticks(Rc::clone(&ticks)), &"c", false);

        let paused = manager.pause_all_running_actions();
        assert_eq!(paused, vec!["a", "c"]);

        manager.resume_targets(&paused);
        assert_eq!(manager.is_target_paused(&"a"), Some(false));
        assert_eq!(manager.is_target_paused(&"b"), Some(true));
        assert_eq!(manager.is_target_paused(&"c"), Some(false));
    }
}

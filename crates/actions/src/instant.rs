//! Instant actions.

use std::fmt;

use action_scheduler::{Action, ActionContext, Target};

type Callback<T> = Box<dyn FnMut(&ActionContext<'_, T>)>;

/// Runs a closure once, on its first step, then finishes.
///
/// The closure sees the full [`ActionContext`], so it may add, remove, or
/// pause actions, including the action it runs inside.
pub struct CallFunc<T: Target> {
    callback: Callback<T>,
    fired: bool,
}

impl<T: Target> CallFunc<T> {
    pub fn new(callback: impl FnMut(&ActionContext<'_, T>) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            fired: false,
        }
    }
}

impl<T: Target> Action<T> for CallFunc<T> {
    fn start(&mut self, _target: &T) {
        self.fired = false;
    }

    fn step(&mut self, _dt: f32, cx: &ActionContext<'_, T>) {
        if !self.fired {
            self.fired = true;
            (self.callback)(cx);
        }
    }

    fn is_done(&self) -> bool {
        self.fired
    }
}

impl<T: Target> fmt::Debug for CallFunc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallFunc")
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

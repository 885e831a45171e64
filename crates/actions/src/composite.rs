//! Composite actions.
//!
//! Composite actions drive several children as one scheduled action.
//! This module provides [`Sequence`] (one after another) and [`Spawn`]
//! (all at once).

use action_scheduler::{Action, ActionContext, Target};
use tracing::trace;

use crate::BoxedAction;

/// Runs child actions one after another.
///
/// # Semantics
///
/// Only the first child is started with the sequence. When a child reports
/// done it is stopped, the next child is started, and that child receives a
/// zero-length step in the same frame. The sequence is done once its last
/// child is.
pub struct Sequence<T: Target> {
    children: Vec<BoxedAction<T>>,
    current: usize,
}

impl<T: Target> Sequence<T> {
    /// Creates a new sequence with the given children.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedAction<T>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            current: 0,
        }
    }

    /// Index of the child currently running.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T: Target> Action<T> for Sequence<T> {
    fn start(&mut self, target: &T) {
        self.current = 0;
        self.children[0].start(target);
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        let mut dt = dt;
        while let Some(child) = self.children.get_mut(self.current) {
            child.step(dt, cx);
            if !child.is_done() {
                return;
            }
            child.stop();
            self.current += 1;

            let Some(next) = self.children.get_mut(self.current) else {
                return;
            };
            trace!(
                target: "actions::sequence",
                action = %cx.id(),
                child = self.current,
                "sequence advanced"
            );
            next.start(cx.target());
            dt = 0.0;
        }
    }

    fn is_done(&self) -> bool {
        self.current >= self.children.len()
    }
}

/// Runs child actions side by side.
///
/// # Semantics
///
/// Every child is started with the spawn and stepped on each of its steps
/// until it reports done, at which point it is stopped on its own. The spawn
/// is done once every child is.
pub struct Spawn<T: Target> {
    children: Vec<BoxedAction<T>>,
}

impl<T: Target> Spawn<T> {
    /// Creates a new spawn with the given children.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedAction<T>>) -> Self {
        assert!(!children.is_empty(), "Spawn must have at least one child");
        Self { children }
    }
}

impl<T: Target> Action<T> for Spawn<T> {
    fn start(&mut self, target: &T) {
        for child in &mut self.children {
            child.start(target);
        }
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, T>) {
        for child in self.children.iter_mut().filter(|child| !child.is_done()) {
            child.step(dt, cx);
            if child.is_done() {
                child.stop();
            }
        }
    }

    fn is_done(&self) -> bool {
        self.children.iter().all(|child| child.is_done())
    }
}

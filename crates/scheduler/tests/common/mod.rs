//! Shared probe action for integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use action_scheduler::{Action, ActionContext, ActionFlags, ActionTag};

pub type Key = &'static str;

/// Lifecycle counters shared between a probe and the test body.
#[derive(Debug, Default)]
pub struct Counters {
    pub starts: Cell<usize>,
    pub steps: Cell<usize>,
    pub stops: Cell<usize>,
    pub drops: Cell<usize>,
    pub elapsed: Cell<f32>,
}

impl Counters {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn steps(&self) -> usize {
        self.steps.get()
    }

    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

type Hook = Box<dyn FnMut(&ActionContext<'_, Key>)>;

/// Action that finishes after a fixed number of steps (or never) and counts
/// everything the scheduler does to it.
pub struct Probe {
    counters: Rc<Counters>,
    remaining: Option<usize>,
    tag: ActionTag,
    flags: ActionFlags,
    on_step: Option<Hook>,
    on_stop: Option<Box<dyn FnMut()>>,
}

impl Probe {
    /// Never finishes on its own.
    pub fn endless(counters: &Rc<Counters>) -> Self {
        Self {
            counters: Rc::clone(counters),
            remaining: None,
            tag: ActionTag::INVALID,
            flags: ActionFlags::empty(),
            on_step: None,
            on_stop: None,
        }
    }

    /// Finishes after `steps` steps.
    pub fn lasting(steps: usize, counters: &Rc<Counters>) -> Self {
        let mut probe = Self::endless(counters);
        probe.remaining = Some(steps);
        probe
    }

    pub fn tagged(mut self, tag: i32) -> Self {
        self.tag = ActionTag(tag);
        self
    }

    pub fn flagged(mut self, flags: ActionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Runs `hook` at the end of every step.
    pub fn on_step(mut self, hook: impl FnMut(&ActionContext<'_, Key>) + 'static) -> Self {
        self.on_step = Some(Box::new(hook));
        self
    }

    pub fn on_stop(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_stop = Some(Box::new(hook));
        self
    }
}

impl Action<Key> for Probe {
    fn start(&mut self, _target: &Key) {
        self.counters.starts.set(self.counters.starts.get() + 1);
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, Key>) {
        assert!(!self.is_done(), "stepped after reporting done");

        self.counters.steps.set(self.counters.steps.get() + 1);
        self.counters.elapsed.set(self.counters.elapsed.get() + dt);
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        if let Some(hook) = self.on_step.as_mut() {
            hook(cx);
        }
    }

    fn is_done(&self) -> bool {
        self.remaining == Some(0)
    }

    fn stop(&mut self) {
        self.counters.stops.set(self.counters.stops.get() + 1);
        if let Some(hook) = self.on_stop.as_mut() {
            hook();
        }
    }

    fn tag(&self) -> ActionTag {
        self.tag
    }

    fn flags(&self) -> ActionFlags {
        self.flags
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}

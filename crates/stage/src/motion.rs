//! Node transform actions.
//!
//! [`Tween`] animates one node property from the value it has when the
//! tween starts. Each property carries its own [`ActionFlags`] bit, so
//! `remove_actions_by_flags(ActionFlags::POSITION, ..)` stops every
//! movement on a node and leaves rotations alone.

use std::cell::Cell;
use std::rc::Rc;

use action_scheduler::{Action, ActionContext, ActionFlags};
use actions::{BoxedAction, CallFunc, Easing, Interval, Tagged};

use crate::node::{NodeRef, Vec2};

/// Node property a [`Tween`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Position,
    /// Uses the `x` component only.
    Rotation,
    Scale,
}

impl Property {
    fn flags(self) -> ActionFlags {
        match self {
            Property::Position => ActionFlags::POSITION,
            Property::Rotation => ActionFlags::ROTATION,
            Property::Scale => ActionFlags::SCALE,
        }
    }

    fn read(self, node: &NodeRef) -> Vec2 {
        let node = node.borrow();
        match self {
            Property::Position => node.position,
            Property::Rotation => Vec2::new(node.rotation, 0.0),
            Property::Scale => node.scale,
        }
    }

    fn write(self, node: &NodeRef, value: Vec2) {
        node.update(|node| match self {
            Property::Position => node.position = value,
            Property::Rotation => node.rotation = value.x,
            Property::Scale => node.scale = value,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Goal {
    To(Vec2),
    By(Vec2),
}

/// Eased animation of one node property.
pub struct Tween {
    property: Property,
    goal: Goal,
    span: Rc<Cell<(Vec2, Vec2)>>,
    inner: Interval<NodeRef>,
}

impl Tween {
    fn new(property: Property, goal: Goal, duration: f32) -> Self {
        let span = Rc::new(Cell::new((Vec2::ZERO, Vec2::ZERO)));
        let shared = Rc::clone(&span);
        let inner = Interval::new(duration, move |node: &NodeRef, t: f32| {
            let (from, to) = shared.get();
            property.write(node, from.lerp(to, t));
        });
        Self {
            property,
            goal,
            span,
            inner,
        }
    }

    pub fn move_to(duration: f32, position: Vec2) -> Self {
        Self::new(Property::Position, Goal::To(position), duration)
    }

    pub fn move_by(duration: f32, delta: Vec2) -> Self {
        Self::new(Property::Position, Goal::By(delta), duration)
    }

    pub fn rotate_to(duration: f32, degrees: f32) -> Self {
        Self::new(Property::Rotation, Goal::To(Vec2::new(degrees, 0.0)), duration)
    }

    pub fn rotate_by(duration: f32, degrees: f32) -> Self {
        Self::new(Property::Rotation, Goal::By(Vec2::new(degrees, 0.0)), duration)
    }

    pub fn scale_to(duration: f32, scale: Vec2) -> Self {
        Self::new(Property::Scale, Goal::To(scale), duration)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.inner = self.inner.with_easing(easing);
        self
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn boxed(self) -> BoxedAction<NodeRef> {
        Box::new(self)
    }
}

impl Action<NodeRef> for Tween {
    fn start(&mut self, target: &NodeRef) {
        let from = self.property.read(target);
        let to = match self.goal {
            Goal::To(to) => to,
            Goal::By(delta) => from + delta,
        };
        self.span.set((from, to));
        self.inner.start(target);
    }

    fn step(&mut self, dt: f32, cx: &ActionContext<'_, NodeRef>) {
        self.inner.step(dt, cx);
    }

    fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    fn flags(&self) -> ActionFlags {
        self.property.flags()
    }
}

/// Instantly shows or hides a node. Carries the visibility flag.
pub fn set_visible(visible: bool) -> BoxedAction<NodeRef> {
    let toggle = CallFunc::new(move |cx: &ActionContext<'_, NodeRef>| {
        cx.target().update(|node| node.visible = visible);
    });
    Box::new(Tagged::new(toggle).with_flags(ActionFlags::VISIBILITY))
}

#[cfg(test)]
mod tests {
    use action_scheduler::ActionManager;

    use super::*;

    #[test]
    fn move_by_is_relative_to_the_start_position() {
        let manager: ActionManager<NodeRef> = ActionManager::new();
        let node = NodeRef::named("mover");
        node.update(|n| n.position = Vec2::new(10.0, 10.0));

        node.run_action(&manager, Tween::move_by(1.0, Vec2::new(4.0, -2.0)));
        manager.update(0.5);
        assert_eq!(node.borrow().position, Vec2::new(12.0, 9.0));

        manager.update(0.5);
        assert_eq!(node.borrow().position, Vec2::new(14.0, 8.0));
        assert_eq!(node.number_of_running_actions(&manager), 0);
    }

    #[test]
    fn flags_follow_the_property() {
        let manager: ActionManager<NodeRef> = ActionManager::new();
        let node = NodeRef::named("spinner");
        node.run_action(&manager, Tween::move_to(1.0, Vec2::ONE));
        node.run_action(&manager, Tween::rotate_by(1.0, 90.0));
        node.run_action(&manager, set_visible(false));

        let removed = manager.remove_actions_by_flags(ActionFlags::POSITION, &node);
        assert_eq!(removed, 1);

        manager.update(1.0);
        let state = node.snapshot();
        assert_eq!(state.position, Vec2::ZERO);
        assert_eq!(state.rotation, 90.0);
        assert!(!state.visible);
    }
}

//! Scene nodes used as scheduler targets.
//!
//! A [`Node`] is plain data. Scenes share nodes through [`NodeRef`], whose
//! equality and hash follow pointer identity: two nodes with equal fields
//! are still different targets.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};
use std::rc::Rc;

use action_scheduler::{Action, ActionId, ActionManager, ActionTag};
use serde::Serialize;

/// 2D vector for positions and scale factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` to `to`.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Transform and visibility of one scene object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub position: Vec2,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub visible: bool,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            visible: true,
        }
    }
}

/// Shared handle to a [`Node`], usable as a scheduler target.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    pub fn new(node: Node) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Node::new(name))
    }

    pub fn borrow(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }

    /// Applies `f` to the node.
    pub fn update<R>(&self, f: impl FnOnce(&mut Node) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Copy of the node's current state.
    pub fn snapshot(&self) -> Node {
        self.0.borrow().clone()
    }

    // Scheduler shortcuts.

    /// Schedules `action` on this node. The node's existing pause state wins.
    pub fn run_action(
        &self,
        manager: &ActionManager<NodeRef>,
        action: impl Action<NodeRef> + 'static,
    ) -> ActionId {
        manager.add_action(action, self, false)
    }

    /// Removes one action by id. Returns whether it was found on this node.
    pub fn stop_action(&self, manager: &ActionManager<NodeRef>, id: ActionId) -> bool {
        manager.target_of(id).as_ref() == Some(self) && manager.remove_action(id)
    }

    pub fn stop_action_by_tag(&self, manager: &ActionManager<NodeRef>, tag: ActionTag) -> bool {
        manager.remove_action_by_tag(tag, self)
    }

    pub fn stop_all_actions(&self, manager: &ActionManager<NodeRef>) -> usize {
        manager.remove_all_actions_from_target(self)
    }

    pub fn pause(&self, manager: &ActionManager<NodeRef>) -> bool {
        manager.pause_target(self)
    }

    pub fn resume(&self, manager: &ActionManager<NodeRef>) -> bool {
        manager.resume_target(self)
    }

    pub fn number_of_running_actions(&self, manager: &ActionManager<NodeRef>) -> usize {
        manager.number_of_running_actions_in_target(self)
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl Hash for NodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => write!(f, "Node({})", node.name),
            Err(_) => write!(f, "Node({:p})", Rc::as_ptr(&self.0)),
        }
    }
}

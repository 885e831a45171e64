//! Named node collection and its end-of-run report.

use serde::Serialize;

use crate::config::StageConfig;
use crate::driver::FrameDriver;
use crate::node::{Node, NodeRef};

/// Nodes of a scene, in creation order.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<NodeRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node and returns a handle to it.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeRef {
        let node = NodeRef::named(name);
        self.nodes.push(node.clone());
        node
    }

    pub fn find(&self, name: &str) -> Option<&NodeRef> {
        self.nodes.iter().find(|node| node.borrow().name == name)
    }

    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// Snapshot of the scene and the scheduler driving it.
    pub fn report(&self, driver: &FrameDriver) -> SceneReport {
        let manager = driver.manager();
        SceneReport {
            frames: driver.frame(),
            elapsed: driver.elapsed(),
            running_actions: manager.number_of_running_actions(),
            config: driver.config().clone(),
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeReport {
                    running_actions: manager.number_of_running_actions_in_target(node),
                    paused: manager.is_target_paused(node).unwrap_or(false),
                    state: node.snapshot(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SceneReport {
    pub frames: u64,
    pub elapsed: f64,
    pub running_actions: usize,
    pub config: StageConfig,
    pub nodes: Vec<NodeReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NodeReport {
    #[serde(flatten)]
    pub state: Node,
    pub running_actions: usize,
    pub paused: bool,
}

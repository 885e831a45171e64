//! Scene nodes and the frame driver for `action-scheduler`.
//!
//! - [`node`]: [`Node`] data and the [`NodeRef`] target handle
//! - [`motion`]: transform tweens carrying per-property flags
//! - [`driver`]: [`FrameDriver`], one scheduler update per frame
//! - [`scene`]: node collection and its serializable report
//! - [`config`]: environment-driven [`StageConfig`]
pub mod config;
pub mod driver;
pub mod error;
pub mod motion;
pub mod node;
pub mod scene;

pub use config::StageConfig;
pub use driver::FrameDriver;
pub use error::ConfigError;
pub use motion::{Property, Tween, set_visible};
pub use node::{Node, NodeRef, Vec2};
pub use scene::{NodeReport, Scene, SceneReport};

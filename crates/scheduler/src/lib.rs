//! Per-frame scheduler for time-based actions bound to scene targets.
//!
//! `action-scheduler` owns every running [`Action`] in an explicitly
//! constructed [`ActionManager`]. Once per frame the driver calls
//! [`ActionManager::update`], which steps each action of every unpaused target
//! exactly once, in insertion order, and retires the ones that report done.
//!
//! Steps may call back into the manager (through [`ActionContext`]) to add,
//! remove, query, or pause actions, including the action that is currently
//! stepping. Such removals are absorbed by the salvage protocol: the in-flight
//! action leaves its list immediately but is only dropped once its `step`
//! has returned.
//!
//! Modules are organized by responsibility:
//! - [`action`] defines the action capability and its identity types
//! - [`manager`] hosts the scheduler and its add/update/removal/query/pause API
//! - [`config`] holds capacity tuning
//! - [`error`] describes internal invariant violations
pub mod action;
pub mod config;
pub mod error;
pub mod manager;

mod handle;
mod registry;

pub use action::{Action, ActionContext, ActionFlags, ActionId, ActionTag, Target};
pub use config::SchedulerConfig;
pub use error::InvariantViolation;
pub use manager::ActionManager;

//! Internal consistency errors.
//!
//! The scheduler API itself never fails: misuse is answered with sentinel
//! values (`false`, `0`, `None`) so a frame loop never has to unwind. The
//! types here describe broken internal invariants, as reported by
//! [`ActionManager::validate`](crate::ActionManager::validate). Seeing one
//! means a bug in the scheduler, not in the caller.

use crate::action::ActionId;

/// A violated scheduler invariant.
///
/// Targets are carried in their `Debug` form so the error stays independent
/// of the target type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("target {target} is marked salvaged but has no current action")]
    SalvagedWithoutCurrent { target: String },

    #[error("salvaged action {action} of target {target} is still listed")]
    SalvagedStillListed { target: String, action: ActionId },

    #[error("target {target} keeps an empty handle outside of update")]
    EmptyHandleRetained { target: String },

    #[error("target {target} reports current action {action} outside of update")]
    StaleCurrentAction { target: String, action: ActionId },

    #[error("action {action} of target {target} is missing while not stepping")]
    MissingAction { target: String, action: ActionId },

    #[error("scan cursor of target {target} is at {next} past a list of {len}")]
    CursorOutOfRange {
        target: String,
        next: usize,
        len: usize,
    },

    #[error("action {action} is listed more than once")]
    DuplicateActionId { action: ActionId },

    #[error("action {action} is listed under {listed} but indexed under {indexed}")]
    OwnerMismatch {
        action: ActionId,
        listed: String,
        indexed: String,
    },

    #[error("{indexed} actions are indexed but {listed} are listed")]
    IndexOutOfSync { indexed: usize, listed: usize },
}

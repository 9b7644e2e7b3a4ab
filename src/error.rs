//! Contract violations reported by tables and drivers.

use crate::core::{ActionId, StateId};
use thiserror::Error;

/// Errors raised when a machine is wired or driven incorrectly.
///
/// Every operation that returns one of these leaves the table or driver
/// exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("State {state} is not registered")]
    UnknownState { state: String },

    #[error("Transition for action {action} from state {from} already exists")]
    DuplicateTransition { action: ActionId, from: StateId },

    #[error("State {state} already has a binding")]
    DuplicateBinding { state: String },

    #[error("{states} states declared but {bindings} bindings registered")]
    BindingCountMismatch { states: usize, bindings: usize },

    #[error("Machine is already running")]
    AlreadyStarted,

    #[error("Machine has not been started")]
    NotStarted,

    #[error("No transition for action {action} from state {from}")]
    NoTransition { action: ActionId, from: StateId },

    #[error("State name '{name}' hashes to the same value as '{existing}'")]
    HashCollision { name: String, existing: String },
}

impl FsmError {
    pub(crate) fn unknown_state(state: impl ToString) -> Self {
        FsmError::UnknownState {
            state: state.to_string(),
        }
    }

    pub(crate) fn duplicate_binding(state: impl ToString) -> Self {
        FsmError::DuplicateBinding {
            state: state.to_string(),
        }
    }
}

//! Identifier newtypes shared by both machine variants.
//!
//! Identifiers never carry a sentinel value. Where "no state" is meaningful
//! the API uses `Option<StateId>` instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state in a [`StateTable`](crate::table::StateTable).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub i32);

/// Identifier of an action that triggers a table transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub i32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.0)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

impl From<i32> for StateId {
    fn from(value: i32) -> Self {
        StateId(value)
    }
}

impl From<i32> for ActionId {
    fn from(value: i32) -> Self {
        ActionId(value)
    }
}

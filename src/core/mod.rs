//! Core types shared by the table-driven and animation-driven machines.
//!
//! - Identifier newtypes (`StateId`, `ActionId`)
//! - Typed states and actions via the `State` and `Action` traits
//! - Per-state callback bindings
//! - State change records and bounded history

mod binding;
mod history;
mod ids;
mod state;

pub use binding::{Binding, Callback};
pub use history::{RecordedChange, StateChange, StateHistory};
pub use ids::{ActionId, StateId};
pub use state::{Action, State};

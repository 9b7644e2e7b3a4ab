//! Static transition tables.
//!
//! A [`StateTable`] declares the shape of a machine: its states and the
//! action-triggered transitions between them. It is written once while the
//! owner sets up the machine and only read afterwards; there is no removal
//! operation. Drivers hold it behind an `Arc`, so several machines can share
//! one table.

use crate::core::{Action, ActionId, State, StateId};
use crate::error::FsmError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A declared state and its display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: StateId,
    pub name: String,
}

/// A legal move from `from` to `to` when `action` is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub action: ActionId,
    pub from: StateId,
    pub to: StateId,
}

/// Declarative state and transition table.
///
/// # Example
///
/// ```rust
/// use statebind::core::{ActionId, StateId};
/// use statebind::table::StateTable;
///
/// let mut table = StateTable::new();
/// table.add_state(StateId(0), "Closed");
/// table.add_state(StateId(1), "Open");
/// table.add_transition(ActionId(0), StateId(0), StateId(1)).unwrap();
///
/// let transition = table.transition(ActionId(0), StateId(0)).unwrap();
/// assert_eq!(transition.map(|t| t.to), Some(StateId(1)));
/// assert!(table.transition(ActionId(0), StateId(1)).unwrap().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateTable {
    states: Vec<StateEntry>,
    state_index: HashMap<StateId, usize>,
    action_names: BTreeMap<ActionId, String>,
    transitions: Vec<Transition>,
    transition_index: HashMap<(ActionId, StateId), usize>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state. Returns `false` when the id was already present,
    /// in which case the first registered name is kept.
    pub fn add_state(&mut self, id: StateId, name: impl Into<String>) -> bool {
        if self.state_index.contains_key(&id) {
            return false;
        }
        self.state_index.insert(id, self.states.len());
        self.states.push(StateEntry {
            id,
            name: name.into(),
        });
        true
    }

    /// Register a typed state under its canonical id and name.
    pub fn add_typed_state<S: State>(&mut self, state: &S) -> bool {
        self.add_state(state.id(), state.name())
    }

    /// Attach a display name to an action id. The first name wins.
    pub fn name_action(&mut self, id: ActionId, name: impl Into<String>) {
        self.action_names.entry(id).or_insert_with(|| name.into());
    }

    /// Declare a transition between two registered states.
    ///
    /// Fails without touching the table when either state is unknown or a
    /// transition already exists for `(action, from)`.
    pub fn add_transition(
        &mut self,
        action: ActionId,
        from: StateId,
        to: StateId,
    ) -> Result<(), FsmError> {
        if !self.has_state(from) {
            return Err(FsmError::unknown_state(from));
        }
        if !self.has_state(to) {
            return Err(FsmError::unknown_state(to));
        }
        self.insert_transition(action, from, to)
    }

    /// Typed form of [`add_transition`](Self::add_transition).
    ///
    /// Both states are registered on demand with their canonical names, and
    /// the action's name is recorded. A duplicate `(action, from)` pair is
    /// rejected before anything is registered.
    pub fn add_transition_info<A: Action, S: State>(
        &mut self,
        action: &A,
        from: &S,
        to: &S,
    ) -> Result<(), FsmError> {
        if self.transition_index.contains_key(&(action.id(), from.id())) {
            return Err(FsmError::DuplicateTransition {
                action: action.id(),
                from: from.id(),
            });
        }
        self.add_typed_state(from);
        self.add_typed_state(to);
        self.name_action(action.id(), action.name());
        self.insert_transition(action.id(), from.id(), to.id())
    }

    fn insert_transition(
        &mut self,
        action: ActionId,
        from: StateId,
        to: StateId,
    ) -> Result<(), FsmError> {
        if self.transition_index.contains_key(&(action, from)) {
            return Err(FsmError::DuplicateTransition { action, from });
        }
        self.transition_index
            .insert((action, from), self.transitions.len());
        self.transitions.push(Transition { action, from, to });
        Ok(())
    }

    /// Look up the transition for `action` out of `from`.
    ///
    /// `Err` means `from` was never declared; `Ok(None)` means the state
    /// exists but has no transition for this action.
    pub fn transition(
        &self,
        action: ActionId,
        from: StateId,
    ) -> Result<Option<&Transition>, FsmError> {
        if !self.has_state(from) {
            return Err(FsmError::unknown_state(from));
        }
        Ok(self
            .transition_index
            .get(&(action, from))
            .map(|&i| &self.transitions[i]))
    }

    pub fn has_state(&self, id: StateId) -> bool {
        self.state_index.contains_key(&id)
    }

    /// Display name of a state, or `""` when it is unknown.
    pub fn state_name(&self, id: StateId) -> &str {
        self.state_index
            .get(&id)
            .map_or("", |&i| self.states[i].name.as_str())
    }

    /// First state registered under `name`.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// Display name of an action, or `""` when none was recorded.
    pub fn action_name(&self, id: ActionId) -> &str {
        self.action_names.get(&id).map_or("", String::as_str)
    }

    /// States in registration order.
    pub fn states(&self) -> &[StateEntry] {
        &self.states
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn transitions_from(&self, from: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == from)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &str)> {
        self.action_names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

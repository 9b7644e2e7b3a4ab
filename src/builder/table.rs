//! Builder for constructing state tables.

use crate::core::{Action, ActionId, State, StateId};
use crate::error::FsmError;
use crate::table::StateTable;
use std::sync::Arc;

/// Builder for [`StateTable`]s with a fluent API.
///
/// Registration errors do not interrupt the chain; the first one is kept
/// and returned from [`build`](Self::build).
///
/// # Example
///
/// ```
/// use statebind::builder::TableBuilder;
/// use statebind::{action_enum, state_enum};
///
/// state_enum! {
///     enum Light { Red, Green, Yellow }
/// }
///
/// action_enum! {
///     enum Signal { Next }
/// }
///
/// let table = TableBuilder::new()
///     .typed_transition(&Signal::Next, &Light::Red, &Light::Green)
///     .typed_transition(&Signal::Next, &Light::Green, &Light::Yellow)
///     .typed_transition(&Signal::Next, &Light::Yellow, &Light::Red)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.state_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: StateTable,
    error: Option<FsmError>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state by raw id.
    pub fn state(mut self, id: StateId, name: impl Into<String>) -> Self {
        self.table.add_state(id, name);
        self
    }

    /// Declare a typed state.
    pub fn typed_state<S: State>(mut self, state: &S) -> Self {
        self.table.add_typed_state(state);
        self
    }

    /// Declare every state in `states`.
    pub fn typed_states<'a, S: State + 'a>(mut self, states: impl IntoIterator<Item = &'a S>) -> Self {
        for state in states {
            self.table.add_typed_state(state);
        }
        self
    }

    /// Declare a transition between states already declared on this builder.
    pub fn transition(mut self, action: ActionId, from: StateId, to: StateId) -> Self {
        let result = self.table.add_transition(action, from, to);
        self.keep_first_error(result);
        self
    }

    /// Declare a typed transition, registering both states on demand.
    pub fn typed_transition<A: Action, S: State>(mut self, action: &A, from: &S, to: &S) -> Self {
        let result = self.table.add_transition_info(action, from, to);
        self.keep_first_error(result);
        self
    }

    fn keep_first_error(&mut self, result: Result<(), FsmError>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    /// Finish the table, failing with the first registration error.
    pub fn build(self) -> Result<StateTable, FsmError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.table),
        }
    }

    /// Finish the table wrapped for sharing between machines.
    pub fn build_shared(self) -> Result<Arc<StateTable>, FsmError> {
        self.build().map(Arc::new)
    }
}

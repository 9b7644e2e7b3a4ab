//! Table-driven state machine driver.
//!
//! A [`TableMachine`] holds exactly one active state and only moves between
//! states through the transitions declared in its [`StateTable`]. The owner
//! drives it synchronously: `execute_action` when something happens and
//! `update` once per host tick.
//!
//! For every transition the driver runs, in this order:
//! 1. `on_exit` of the current state
//! 2. the swap of the current state
//! 3. the state-change observers
//! 4. `on_enter` of the new state

mod observer;

pub use observer::ObserverId;

use crate::config::MachineConfig;
use crate::core::{Action, ActionId, Binding, State, StateChange, StateHistory, StateId};
use crate::error::FsmError;
use crate::table::StateTable;
use observer::Observers;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Lifecycle of a [`TableMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running(StateId),
    Stopped,
}

/// Runtime driver over a shared [`StateTable`].
///
/// # Example
///
/// ```rust
/// use statebind::builder::TableBuilder;
/// use statebind::core::Binding;
/// use statebind::machine::TableMachine;
/// use statebind::{action_enum, state_enum};
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
///
/// action_enum! {
///     enum DoorAction { Push, Pull }
/// }
///
/// let table = TableBuilder::new()
///     .typed_transition(&DoorAction::Push, &Door::Closed, &Door::Open)
///     .typed_transition(&DoorAction::Pull, &Door::Open, &Door::Closed)
///     .build()
///     .unwrap();
///
/// let mut machine = TableMachine::<Vec<&str>>::new(table);
/// machine
///     .bind(&Door::Closed, Binding::new(|log: &mut Vec<&str>| log.push("closed"), |_| {}))
///     .unwrap();
/// machine
///     .bind(&Door::Open, Binding::new(|log: &mut Vec<&str>| log.push("open"), |_| {}))
///     .unwrap();
///
/// let mut log = Vec::new();
/// machine.start_in(&Door::Closed, &mut log).unwrap();
/// machine.execute(&DoorAction::Push, &mut log).unwrap();
///
/// assert_eq!(log, vec!["closed", "open"]);
/// assert_eq!(machine.current_state_name(), "Open");
/// ```
pub struct TableMachine<Ctx> {
    table: Arc<StateTable>,
    bindings: HashMap<StateId, Binding<Ctx>>,
    phase: Phase,
    observers: Observers,
    history: Option<StateHistory>,
    config: MachineConfig,
}

impl<Ctx> TableMachine<Ctx> {
    /// Create a machine over `table` with the default configuration.
    pub fn new(table: impl Into<Arc<StateTable>>) -> Self {
        Self::with_config(table, MachineConfig::default())
    }

    pub fn with_config(table: impl Into<Arc<StateTable>>, config: MachineConfig) -> Self {
        let history = config
            .record_history
            .then(|| StateHistory::with_capacity(config.history_capacity));
        Self {
            table: table.into(),
            bindings: HashMap::new(),
            phase: Phase::NotStarted,
            observers: Observers::default(),
            history,
            config,
        }
    }

    /// Attach callbacks to a state declared in the table.
    pub fn add_binding(&mut self, state: StateId, binding: Binding<Ctx>) -> Result<(), FsmError> {
        if !self.table.has_state(state) {
            return Err(FsmError::unknown_state(state));
        }
        if self.bindings.contains_key(&state) {
            return Err(FsmError::duplicate_binding(self.describe(state)));
        }
        self.bindings.insert(state, binding);
        Ok(())
    }

    /// Typed form of [`add_binding`](Self::add_binding).
    pub fn bind<S: State>(&mut self, state: &S, binding: Binding<Ctx>) -> Result<(), FsmError> {
        self.add_binding(state.id(), binding)
    }

    /// Enter `initial`, running only its `on_enter`.
    ///
    /// Requires every table state to be bound and the machine not to be
    /// running. A stopped machine may be started again.
    pub fn start(&mut self, initial: StateId, ctx: &mut Ctx) -> Result<(), FsmError> {
        if self.is_running() {
            return Err(FsmError::AlreadyStarted);
        }
        if self.bindings.len() != self.table.state_count() {
            return Err(FsmError::BindingCountMismatch {
                states: self.table.state_count(),
                bindings: self.bindings.len(),
            });
        }
        if !self.bindings.contains_key(&initial) {
            return Err(FsmError::unknown_state(initial));
        }

        debug!(
            machine = %self.config.name,
            state = %self.table.state_name(initial),
            "machine started"
        );
        self.enter(
            StateChange {
                from: None,
                to: initial,
                action: None,
            },
            ctx,
        );
        Ok(())
    }

    /// Typed form of [`start`](Self::start).
    pub fn start_in<S: State>(&mut self, initial: &S, ctx: &mut Ctx) -> Result<(), FsmError> {
        self.start(initial.id(), ctx)
    }

    /// Perform the transition declared for `action` out of the current state.
    ///
    /// Returns the new current state. When no such transition exists the
    /// machine is left untouched and no callback runs.
    pub fn execute_action(&mut self, action: ActionId, ctx: &mut Ctx) -> Result<StateId, FsmError> {
        let Phase::Running(from) = self.phase else {
            return Err(FsmError::NotStarted);
        };
        let Some(transition) = self.table.transition(action, from)?.copied() else {
            warn!(
                machine = %self.config.name,
                action = %self.table.action_name(action),
                state = %self.table.state_name(from),
                "no transition for action"
            );
            return Err(FsmError::NoTransition { action, from });
        };

        if let Some(binding) = self.bindings.get_mut(&from) {
            binding.exit(ctx);
        }
        debug!(
            machine = %self.config.name,
            action = %self.table.action_name(action),
            from = %self.table.state_name(from),
            to = %self.table.state_name(transition.to),
            "transition"
        );
        self.enter(
            StateChange {
                from: Some(from),
                to: transition.to,
                action: Some(action),
            },
            ctx,
        );
        Ok(transition.to)
    }

    /// Typed form of [`execute_action`](Self::execute_action).
    pub fn execute<A: Action>(&mut self, action: &A, ctx: &mut Ctx) -> Result<StateId, FsmError> {
        self.execute_action(action.id(), ctx)
    }

    // Swap, notify, enter.
    fn enter(&mut self, change: StateChange, ctx: &mut Ctx) {
        self.phase = Phase::Running(change.to);
        if let Some(history) = self.history.as_mut() {
            history.record(change);
        }
        self.observers.notify(&change);
        if let Some(binding) = self.bindings.get_mut(&change.to) {
            binding.enter(ctx);
        }
    }

    /// Run the current state's `on_update` once. Does nothing unless running.
    pub fn update(&mut self, ctx: &mut Ctx) {
        let Phase::Running(current) = self.phase else {
            return;
        };
        if let Some(binding) = self.bindings.get_mut(&current) {
            if !binding.update(ctx) {
                trace!(machine = %self.config.name, "state has no update callback");
            }
        }
    }

    /// Leave the running phase without calling `on_exit`.
    pub fn stop(&mut self) {
        if let Phase::Running(current) = self.phase {
            debug!(
                machine = %self.config.name,
                state = %self.table.state_name(current),
                "machine stopped"
            );
            self.phase = Phase::Stopped;
        }
    }

    /// Register an observer called on every state swap, before `on_enter`.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&StateChange) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn is_in_state(&self, state: StateId) -> bool {
        self.phase == Phase::Running(state)
    }

    pub fn current_state(&self) -> Option<StateId> {
        match self.phase {
            Phase::Running(current) => Some(current),
            _ => None,
        }
    }

    /// Name of the current state, or `""` when not running.
    pub fn current_state_name(&self) -> &str {
        self.current_state()
            .map_or("", |state| self.table.state_name(state))
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn table(&self) -> &Arc<StateTable> {
        &self.table
    }

    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn describe(&self, state: StateId) -> String {
        match self.table.state_name(state) {
            "" => state.to_string(),
            name => name.to_string(),
        }
    }
}

impl<Ctx> fmt::Debug for TableMachine<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableMachine")
            .field("name", &self.config.name)
            .field("phase", &self.phase)
            .field("bindings", &self.bindings.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::{action_enum, state_enum};
    use std::cell::RefCell;
    use std::rc::Rc;

    state_enum! {
        enum Camera {
            Follow,
            Zoom,
            Shake,
        }
    }

    action_enum! {
        enum CameraAction {
            ZoomIn,
            ZoomOut,
            Impact,
            Settle,
            Refocus,
        }
    }

    type Log = Vec<String>;

    fn camera_table() -> StateTable {
        TableBuilder::new()
            .typed_transition(&CameraAction::ZoomIn, &Camera::Follow, &Camera::Zoom)
            .typed_transition(&CameraAction::ZoomOut, &Camera::Zoom, &Camera::Follow)
            .typed_transition(&CameraAction::Impact, &Camera::Follow, &Camera::Shake)
            .typed_transition(&CameraAction::Settle, &Camera::Shake, &Camera::Follow)
            .typed_transition(&CameraAction::Refocus, &Camera::Zoom, &Camera::Zoom)
            .build()
            .unwrap()
    }

    fn logging_binding(name: &'static str) -> Binding<Log> {
        Binding::new(
            move |log: &mut Log| log.push(format!("enter {name}")),
            move |log: &mut Log| log.push(format!("exit {name}")),
        )
        .with_update(move |log: &mut Log| log.push(format!("update {name}")))
    }

    fn bound_machine() -> TableMachine<Log> {
        let mut machine = TableMachine::new(camera_table());
        machine.bind(&Camera::Follow, logging_binding("Follow")).unwrap();
        machine.bind(&Camera::Zoom, logging_binding("Zoom")).unwrap();
        machine.bind(&Camera::Shake, logging_binding("Shake")).unwrap();
        machine
    }

    #[test]
    fn start_runs_only_initial_enter() {
        let mut machine = bound_machine();
        let mut log = Log::new();

        machine.start_in(&Camera::Follow, &mut log).unwrap();

        assert_eq!(log, vec!["enter Follow"]);
        assert!(machine.is_in_state(Camera::Follow.id()));
        assert_eq!(machine.phase(), Phase::Running(Camera::Follow.id()));
    }

    #[test]
    fn start_requires_every_state_bound() {
        let mut machine = TableMachine::new(camera_table());
        machine.bind(&Camera::Follow, logging_binding("Follow")).unwrap();

        let result = machine.start_in(&Camera::Follow, &mut Log::new());

        assert_eq!(
            result,
            Err(FsmError::BindingCountMismatch {
                states: 3,
                bindings: 1
            })
        );
        assert!(!machine.is_running());
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();

        let result = machine.start_in(&Camera::Zoom, &mut log);

        assert_eq!(result, Err(FsmError::AlreadyStarted));
        assert!(machine.is_in_state(Camera::Follow.id()));
        assert_eq!(log, vec!["enter Follow"]);
    }

    #[test]
    fn start_with_unknown_state_is_rejected() {
        let mut machine = bound_machine();
        let result = machine.start(StateId(42), &mut Log::new());
        assert!(matches!(result, Err(FsmError::UnknownState { .. })));
    }

    #[test]
    fn binding_unknown_state_is_rejected() {
        let mut machine = TableMachine::<Log>::new(camera_table());
        let result = machine.add_binding(StateId(42), Binding::empty());
        assert!(matches!(result, Err(FsmError::UnknownState { .. })));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let mut machine = bound_machine();

        let result = machine.bind(&Camera::Zoom, Binding::empty());

        assert_eq!(
            result,
            Err(FsmError::DuplicateBinding {
                state: "Zoom".to_string()
            })
        );

        // The original binding is still the one that runs.
        let mut log = Log::new();
        machine.start_in(&Camera::Zoom, &mut log).unwrap();
        assert_eq!(log, vec!["enter Zoom"]);
    }

    #[test]
    fn execute_action_runs_exit_then_enter() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();

        let to = machine.execute(&CameraAction::ZoomIn, &mut log).unwrap();

        assert_eq!(to, Camera::Zoom.id());
        assert_eq!(log, vec!["enter Follow", "exit Follow", "enter Zoom"]);
        assert_eq!(machine.current_state_name(), "Zoom");
    }

    #[test]
    fn self_transition_runs_full_sequence() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Zoom, &mut log).unwrap();

        machine.execute(&CameraAction::Refocus, &mut log).unwrap();

        assert_eq!(log, vec!["enter Zoom", "exit Zoom", "enter Zoom"]);
        assert!(machine.is_in_state(Camera::Zoom.id()));
    }

    #[test]
    fn illegal_action_changes_nothing() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();

        let result = machine.execute(&CameraAction::Settle, &mut log);

        assert_eq!(
            result,
            Err(FsmError::NoTransition {
                action: CameraAction::Settle.id(),
                from: Camera::Follow.id()
            })
        );
        assert_eq!(log, vec!["enter Follow"]);
        assert!(machine.is_in_state(Camera::Follow.id()));
    }

    #[test]
    fn execute_before_start_is_rejected() {
        let mut machine = bound_machine();
        let mut log = Log::new();

        let result = machine.execute(&CameraAction::ZoomIn, &mut log);

        assert_eq!(result, Err(FsmError::NotStarted));
        assert!(log.is_empty());
    }

    #[test]
    fn update_runs_current_state_once() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();
        log.clear();

        machine.update(&mut log);
        machine.execute(&CameraAction::Impact, &mut log).unwrap();
        machine.update(&mut log);

        assert_eq!(
            log,
            vec!["update Follow", "exit Follow", "enter Shake", "update Shake"]
        );
    }

    #[test]
    fn update_is_noop_when_not_running() {
        let mut machine = bound_machine();
        let mut log = Log::new();

        machine.update(&mut log);
        assert!(log.is_empty());

        machine.start_in(&Camera::Follow, &mut log).unwrap();
        machine.stop();
        log.clear();
        machine.update(&mut log);

        assert!(log.is_empty());
        assert_eq!(machine.phase(), Phase::Stopped);
    }

    #[test]
    fn stop_skips_exit_and_allows_restart() {
        let mut machine = bound_machine();
        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();

        machine.stop();

        assert_eq!(log, vec!["enter Follow"]);
        assert_eq!(machine.current_state(), None);
        assert_eq!(machine.current_state_name(), "");

        machine.start_in(&Camera::Zoom, &mut log).unwrap();
        assert_eq!(log, vec!["enter Follow", "enter Zoom"]);
    }

    #[test]
    fn observers_fire_after_swap_and_before_enter() {
        let mut machine = TableMachine::<Log>::new(camera_table());
        machine.bind(&Camera::Follow, logging_binding("Follow")).unwrap();
        machine.bind(&Camera::Shake, logging_binding("Shake")).unwrap();
        machine.bind(&Camera::Zoom, logging_binding("Zoom")).unwrap();

        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&changes);
        machine.subscribe(move |change| seen.borrow_mut().push(*change));

        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();
        machine.execute(&CameraAction::Impact, &mut log).unwrap();

        assert_eq!(
            *changes.borrow(),
            vec![
                StateChange {
                    from: None,
                    to: Camera::Follow.id(),
                    action: None
                },
                StateChange {
                    from: Some(Camera::Follow.id()),
                    to: Camera::Shake.id(),
                    action: Some(CameraAction::Impact.id())
                },
            ]
        );
    }

    #[test]
    fn observer_sees_exit_already_done_and_enter_pending() {
        let table = camera_table();
        let events = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut machine = TableMachine::<()>::new(table);

        for state in [Camera::Follow, Camera::Zoom, Camera::Shake] {
            let on_enter = Rc::clone(&events);
            let on_exit = Rc::clone(&events);
            machine
                .bind(
                    &state,
                    Binding::new(
                        move |_| on_enter.borrow_mut().push(format!("enter {}", state.name())),
                        move |_| on_exit.borrow_mut().push(format!("exit {}", state.name())),
                    ),
                )
                .unwrap();
        }
        let observed = Rc::clone(&events);
        machine.subscribe(move |_| observed.borrow_mut().push("changed".to_string()));

        machine.start_in(&Camera::Follow, &mut ()).unwrap();
        machine.execute(&CameraAction::ZoomIn, &mut ()).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                "changed",
                "enter Follow",
                "exit Follow",
                "changed",
                "enter Zoom"
            ]
        );
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let mut machine = bound_machine();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = machine.subscribe(move |_| *counter.borrow_mut() += 1);

        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();
        assert!(machine.unsubscribe(id));
        machine.execute(&CameraAction::ZoomIn, &mut log).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn history_records_transitions_when_enabled() {
        let config = MachineConfig::named("camera").with_history(Some(2));
        let mut machine = TableMachine::with_config(camera_table(), config);
        machine.bind(&Camera::Follow, logging_binding("Follow")).unwrap();
        machine.bind(&Camera::Zoom, logging_binding("Zoom")).unwrap();
        machine.bind(&Camera::Shake, logging_binding("Shake")).unwrap();

        let mut log = Log::new();
        machine.start_in(&Camera::Follow, &mut log).unwrap();
        machine.execute(&CameraAction::ZoomIn, &mut log).unwrap();
        machine.execute(&CameraAction::ZoomOut, &mut log).unwrap();

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.path(),
            vec![Camera::Follow.id(), Camera::Zoom.id(), Camera::Follow.id()]
        );
    }

    #[test]
    fn history_is_absent_by_default() {
        let machine = bound_machine();
        assert!(machine.history().is_none());
    }

    #[test]
    fn machines_can_share_one_table() {
        let table = Arc::new(camera_table());
        let mut first = TableMachine::<Log>::new(Arc::clone(&table));
        let mut second = TableMachine::<Log>::new(Arc::clone(&table));
        for machine in [&mut first, &mut second] {
            machine.bind(&Camera::Follow, Binding::empty()).unwrap();
            machine.bind(&Camera::Zoom, Binding::empty()).unwrap();
            machine.bind(&Camera::Shake, Binding::empty()).unwrap();
        }

        let mut log = Log::new();
        first.start_in(&Camera::Follow, &mut log).unwrap();
        second.start_in(&Camera::Follow, &mut log).unwrap();
        first.execute(&CameraAction::ZoomIn, &mut log).unwrap();

        assert!(first.is_in_state(Camera::Zoom.id()));
        assert!(second.is_in_state(Camera::Follow.id()));
        assert_eq!(Arc::strong_count(&table), 3);
    }
}

//! State machine driven by an external animation graph.
//!
//! An [`AnimatorMachine`] does not decide when transitions happen. The host
//! graph does, and tells the machine through two notifications:
//! [`on_state_entered`](AnimatorMachine::on_state_entered) and
//! [`on_state_exited`](AnimatorMachine::on_state_exited). The machine maps
//! them onto the same enter/update/exit bindings the table driver uses.
//!
//! A graph may report that it entered a new state before it reports leaving
//! the old one. Such an enter is parked in a single pending slot (a newer
//! enter replaces an older one) and only acted on when the exit for the
//! current state arrives: exit(current), then enter(pending).
//!
//! Parameter writes (`set_bool`, `set_integer`, `set_float`, triggers) go to
//! the primary graph and are mirrored to every registered sub graph.

mod graph;
mod hash;

pub use graph::{AnimationGraph, ParamValue, ParameterStore};
pub use hash::StateHash;

use crate::config::MachineConfig;
use crate::core::Binding;
use crate::error::FsmError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Handle for a sub graph added with `add_sub_graph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubGraphId(u64);

/// What a notification did to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The machine was idle and entered the state.
    Entered(StateHash),
    /// Another state is active; the state is now pending.
    Queued(StateHash),
    /// The current state exited and nothing was pending.
    Exited(StateHash),
    /// The current state exited and the pending state was entered.
    Swapped { from: StateHash, to: StateHash },
    /// Unregistered state or stale exit.
    Ignored,
}

struct Registered<Ctx> {
    name: String,
    binding: Binding<Ctx>,
}

/// Animation-graph-driven machine over a host graph `G`.
///
/// # Example
///
/// ```rust
/// use statebind::animator::{AnimatorMachine, ParameterStore, StateHash};
/// use statebind::core::Binding;
///
/// let mut machine = AnimatorMachine::<ParameterStore, Vec<&str>>::new(ParameterStore::new());
/// let idle = machine
///     .register_state("Idle", Binding::new(|log: &mut Vec<&str>| log.push("enter idle"), |log: &mut Vec<&str>| log.push("exit idle")))
///     .unwrap();
/// let run = machine
///     .register_state("Run", Binding::new(|log: &mut Vec<&str>| log.push("enter run"), |_| {}))
///     .unwrap();
///
/// let mut log = Vec::new();
/// machine.on_state_entered(idle, &mut log);
/// machine.on_state_entered(run, &mut log); // parked until Idle exits
/// machine.on_state_exited(idle, &mut log);
///
/// assert_eq!(log, vec!["enter idle", "exit idle", "enter run"]);
/// assert!(machine.is_in_state("Run"));
/// ```
pub struct AnimatorMachine<G, Ctx> {
    primary: G,
    sub_graphs: Vec<(SubGraphId, G)>,
    next_sub_graph: u64,
    states: HashMap<StateHash, Registered<Ctx>>,
    by_name: HashMap<String, StateHash>,
    current: Option<StateHash>,
    pending: Option<StateHash>,
    config: MachineConfig,
}

impl<G: AnimationGraph, Ctx> AnimatorMachine<G, Ctx> {
    /// Bind the machine to the host's primary graph.
    pub fn new(primary: G) -> Self {
        Self::with_config(primary, MachineConfig::default())
    }

    pub fn with_config(primary: G, config: MachineConfig) -> Self {
        Self {
            primary,
            sub_graphs: Vec::new(),
            next_sub_graph: 0,
            states: HashMap::new(),
            by_name: HashMap::new(),
            current: None,
            pending: None,
            config,
        }
    }

    /// Attach callbacks to the graph state called `name`.
    pub fn register_state(
        &mut self,
        name: &str,
        binding: Binding<Ctx>,
    ) -> Result<StateHash, FsmError> {
        self.register_state_hashed(StateHash::of(name), name, binding)
    }

    /// Attach callbacks to a state whose hash the host computed itself.
    pub fn register_state_hashed(
        &mut self,
        hash: StateHash,
        name: &str,
        binding: Binding<Ctx>,
    ) -> Result<StateHash, FsmError> {
        if let Some(existing) = self.states.get(&hash) {
            return Err(Self::conflict(name, &existing.name));
        }
        if self.by_name.contains_key(name) {
            return Err(FsmError::duplicate_binding(name));
        }
        self.by_name.insert(name.to_string(), hash);
        self.states.insert(
            hash,
            Registered {
                name: name.to_string(),
                binding,
            },
        );
        Ok(hash)
    }

    /// Replace the callbacks of `name`, registering it if needed.
    ///
    /// An existing registration is found by name, whichever hash it was
    /// registered under. Unknown names are registered with
    /// [`StateHash::of`]. Returns the binding that was replaced. Fails only
    /// when a different name already owns the hash.
    pub fn override_state(
        &mut self,
        name: &str,
        binding: Binding<Ctx>,
    ) -> Result<Option<Binding<Ctx>>, FsmError> {
        let hash = self.state_hash(name).unwrap_or_else(|| StateHash::of(name));
        match self.states.get_mut(&hash) {
            Some(existing) if existing.name != name => Err(Self::conflict(name, &existing.name)),
            Some(existing) => Ok(Some(std::mem::replace(&mut existing.binding, binding))),
            None => {
                self.register_state_hashed(hash, name, binding)?;
                Ok(None)
            }
        }
    }

    fn conflict(name: &str, existing: &str) -> FsmError {
        if existing == name {
            FsmError::duplicate_binding(name)
        } else {
            FsmError::HashCollision {
                name: name.to_string(),
                existing: existing.to_string(),
            }
        }
    }

    /// The host graph entered `hash`.
    pub fn on_state_entered(&mut self, hash: StateHash, ctx: &mut Ctx) -> Notification {
        if !self.states.contains_key(&hash) {
            trace!(machine = %self.config.name, state = %hash, "enter for unregistered state ignored");
            return Notification::Ignored;
        }
        match self.current {
            None => {
                self.enter(hash, ctx);
                Notification::Entered(hash)
            }
            Some(current) => {
                if let Some(replaced) = self.pending.replace(hash) {
                    debug!(
                        machine = %self.config.name,
                        dropped = %self.state_name(replaced),
                        "pending state replaced"
                    );
                }
                debug!(
                    machine = %self.config.name,
                    current = %self.state_name(current),
                    pending = %self.state_name(hash),
                    "state queued until current exits"
                );
                Notification::Queued(hash)
            }
        }
    }

    /// The host graph exited `hash`.
    pub fn on_state_exited(&mut self, hash: StateHash, ctx: &mut Ctx) -> Notification {
        if self.current != Some(hash) {
            trace!(machine = %self.config.name, state = %hash, "stale exit ignored");
            return Notification::Ignored;
        }

        if let Some(registered) = self.states.get_mut(&hash) {
            registered.binding.exit(ctx);
        }
        self.current = None;

        match self.pending.take() {
            Some(next) => {
                self.enter(next, ctx);
                Notification::Swapped {
                    from: hash,
                    to: next,
                }
            }
            None => {
                debug!(machine = %self.config.name, state = %self.state_name(hash), "state exited");
                Notification::Exited(hash)
            }
        }
    }

    fn enter(&mut self, hash: StateHash, ctx: &mut Ctx) {
        debug!(machine = %self.config.name, state = %self.state_name(hash), "state entered");
        self.current = Some(hash);
        if let Some(registered) = self.states.get_mut(&hash) {
            registered.binding.enter(ctx);
        }
    }

    /// Run the current state's `on_update` once.
    ///
    /// Updates are frozen while a pending state waits for the current one to
    /// exit.
    pub fn update(&mut self, ctx: &mut Ctx) {
        if self.pending.is_some() {
            return;
        }
        let Some(current) = self.current else {
            return;
        };
        if let Some(registered) = self.states.get_mut(&current) {
            registered.binding.update(ctx);
        }
    }

    /// Keep `graph` parameter-synchronised with the primary from now on.
    pub fn add_sub_graph(&mut self, graph: G) -> SubGraphId {
        let id = SubGraphId(self.next_sub_graph);
        self.next_sub_graph += 1;
        self.sub_graphs.push((id, graph));
        id
    }

    /// Stop mirroring writes to a sub graph and hand it back unchanged.
    pub fn remove_sub_graph(&mut self, id: SubGraphId) -> Option<G> {
        let index = self.sub_graphs.iter().position(|(entry, _)| *entry == id)?;
        Some(self.sub_graphs.remove(index).1)
    }

    pub fn sub_graph(&self, id: SubGraphId) -> Option<&G> {
        self.sub_graphs
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, graph)| graph)
    }

    pub fn sub_graph_count(&self) -> usize {
        self.sub_graphs.len()
    }

    pub fn primary(&self) -> &G {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut G {
        &mut self.primary
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, ParamValue::Bool(value));
    }

    pub fn set_integer(&mut self, name: &str, value: i32) {
        self.write(name, ParamValue::Int(value));
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, ParamValue::Float(value));
    }

    /// Fire a trigger on every graph.
    pub fn execute_action(&mut self, trigger: &str) {
        self.write(trigger, ParamValue::Trigger);
    }

    /// Reset a trigger on every graph.
    pub fn cancel_action(&mut self, trigger: &str) {
        trace!(machine = %self.config.name, trigger, "reset trigger");
        self.primary.reset_trigger(trigger);
        for (_, graph) in &mut self.sub_graphs {
            graph.reset_trigger(trigger);
        }
    }

    // Primary first, then sub graphs in insertion order.
    fn write(&mut self, name: &str, value: ParamValue) {
        trace!(machine = %self.config.name, parameter = name, ?value, "set parameter");
        self.primary.set_parameter(name, value);
        for (_, graph) in &mut self.sub_graphs {
            graph.set_parameter(name, value);
        }
    }

    pub fn current_state(&self) -> Option<StateHash> {
        self.current
    }

    /// Name of the current state, or `""` when idle.
    pub fn current_state_name(&self) -> &str {
        self.current.map_or("", |hash| self.state_name(hash))
    }

    pub fn pending_state(&self) -> Option<StateHash> {
        self.pending
    }

    pub fn is_in_state(&self, name: &str) -> bool {
        self.current.is_some() && self.current == self.state_hash(name)
    }

    /// Hash `name` was registered under.
    pub fn state_hash(&self, name: &str) -> Option<StateHash> {
        self.by_name.get(name).copied()
    }

    pub fn has_state(&self, hash: StateHash) -> bool {
        self.states.contains_key(&hash)
    }

    /// Registered name for `hash`, or `""` when unknown.
    pub fn state_name(&self, hash: StateHash) -> &str {
        self.states
            .get(&hash)
            .map_or("", |registered| registered.name.as_str())
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<G, Ctx> fmt::Debug for AnimatorMachine<G, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatorMachine")
            .field("name", &self.config.name)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("states", &self.states.len())
            .field("sub_graphs", &self.sub_graphs.len())
            .finish_non_exhaustive()
    }
}

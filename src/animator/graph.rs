//! Host animation-graph parameter stores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value written to an animation-graph parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    /// A one-shot trigger, consumed by the graph or cleared by `reset_trigger`
    Trigger,
}

/// The host's animation graph, seen as a writable parameter store.
///
/// The machine only ever writes to graphs. How the host evaluates the
/// parameters, and when it emits enter/exit notifications, is up to the host.
pub trait AnimationGraph {
    fn set_parameter(&mut self, name: &str, value: ParamValue);

    fn reset_trigger(&mut self, name: &str);
}

impl<G: AnimationGraph + ?Sized> AnimationGraph for Box<G> {
    fn set_parameter(&mut self, name: &str, value: ParamValue) {
        (**self).set_parameter(name, value);
    }

    fn reset_trigger(&mut self, name: &str) {
        (**self).reset_trigger(name);
    }
}

/// In-memory parameter store.
///
/// Useful for headless hosts and tests: it keeps the last value written to
/// every parameter.
///
/// ```rust
/// use statebind::animator::{AnimationGraph, ParamValue, ParameterStore};
///
/// let mut store = ParameterStore::new();
/// store.set_parameter("speed", ParamValue::Float(1.5));
/// store.set_parameter("jump", ParamValue::Trigger);
///
/// assert_eq!(store.float("speed"), Some(1.5));
/// assert!(store.is_triggered("jump"));
///
/// store.reset_trigger("jump");
/// assert!(!store.is_triggered("jump"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterStore {
    values: HashMap<String, ParamValue>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ParamValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ParamValue::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            ParamValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_triggered(&self, name: &str) -> bool {
        matches!(self.get(name), Some(ParamValue::Trigger))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AnimationGraph for ParameterStore {
    fn set_parameter(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }

    fn reset_trigger(&mut self, name: &str) {
        if self.is_triggered(name) {
            self.values.remove(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_check_the_kind() {
        let mut store = ParameterStore::new();
        store.set_parameter("grounded", ParamValue::Bool(true));
        store.set_parameter("combo", ParamValue::Int(3));

        assert_eq!(store.bool("grounded"), Some(true));
        assert_eq!(store.int("combo"), Some(3));
        assert_eq!(store.int("grounded"), None);
        assert_eq!(store.float("missing"), None);
    }

    #[test]
    fn reset_trigger_leaves_other_kinds_alone() {
        let mut store = ParameterStore::new();
        store.set_parameter("grounded", ParamValue::Bool(false));

        store.reset_trigger("grounded");

        assert_eq!(store.bool("grounded"), Some(false));
    }

    #[test]
    fn boxed_graphs_forward_writes() {
        let mut graph: Box<ParameterStore> = Box::default();
        AnimationGraph::set_parameter(&mut graph, "speed", ParamValue::Float(2.0));
        assert_eq!(graph.float("speed"), Some(2.0));
    }
}

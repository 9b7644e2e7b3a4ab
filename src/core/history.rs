//! State change records and bounded transition history.

use super::ids::{ActionId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A single swap of the current state.
///
/// `from` is `None` for the entry performed by `start`, and `action` is
/// `None` when no action triggered the change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// The state being left
    pub from: Option<StateId>,
    /// The state being entered
    pub to: StateId,
    /// The action that caused the change
    pub action: Option<ActionId>,
}

/// A [`StateChange`] stamped with the time it happened.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedChange {
    pub change: StateChange,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state changes, optionally bounded.
///
/// When a capacity is set, recording past it drops the oldest entry.
///
/// # Example
///
/// ```rust
/// use statebind::core::{StateChange, StateHistory, StateId};
///
/// let mut history = StateHistory::with_capacity(Some(2));
/// history.record(StateChange { from: None, to: StateId(0), action: None });
/// history.record(StateChange { from: Some(StateId(0)), to: StateId(1), action: None });
/// history.record(StateChange { from: Some(StateId(1)), to: StateId(2), action: None });
///
/// // The oldest entry was dropped, but its successor still names where it came from.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec![StateId(0), StateId(1), StateId(2)]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    entries: VecDeque<RecordedChange>,
    capacity: Option<usize>,
}

impl StateHistory {
    /// Create a new unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `capacity` entries.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Record a change stamped with the current time.
    pub fn record(&mut self, change: StateChange) {
        self.record_at(change, Utc::now());
    }

    /// Record a change with an explicit timestamp.
    pub fn record_at(&mut self, change: StateChange, timestamp: DateTime<Utc>) {
        if self.capacity == Some(0) {
            return;
        }
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(RecordedChange { change, timestamp });
    }

    /// Get the path of states traversed.
    ///
    /// Starts with the `from` state of the oldest retained entry when it has
    /// one, followed by the `to` state of every entry.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.entries.len() + 1);
        if let Some(from) = self.entries.front().and_then(|e| e.change.from) {
            path.push(from);
        }
        path.extend(self.entries.iter().map(|e| e.change.to));
        path
    }

    /// Elapsed time between the oldest and newest retained entries.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RecordedChange> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&RecordedChange> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//! Serializable snapshots of state tables.
//!
//! A snapshot is a read-only export of a [`StateTable`] for inspection and
//! debugging tools: states, action names and transitions, stamped with a
//! format version, an id and the time it was taken. JSON and a compact
//! binary encoding are supported, and a snapshot can be turned back into a
//! table.

pub mod error;

pub use error::SnapshotError;

use crate::core::ActionId;
use crate::table::{StateEntry, StateTable, Transition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// A named action as it appears in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: ActionId,
    pub name: String,
}

/// Serializable view of a [`StateTable`].
///
/// ```rust
/// use statebind::core::{ActionId, StateId};
/// use statebind::snapshot::TableSnapshot;
/// use statebind::table::StateTable;
///
/// let mut table = StateTable::new();
/// table.add_state(StateId(0), "Menu");
/// table.add_state(StateId(1), "Level");
/// table.add_transition(ActionId(0), StateId(0), StateId(1)).unwrap();
///
/// let json = TableSnapshot::of(&table).to_json().unwrap();
/// let restored = TableSnapshot::from_json(&json).unwrap().into_table().unwrap();
///
/// assert_eq!(restored.state_name(StateId(1)), "Level");
/// assert_eq!(restored.transition_count(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// States in registration order
    pub states: Vec<StateEntry>,

    /// Named actions ordered by id
    pub actions: Vec<ActionEntry>,

    /// Transitions in declaration order
    pub transitions: Vec<Transition>,
}

impl TableSnapshot {
    /// Take a snapshot of `table`.
    pub fn of(table: &StateTable) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            states: table.states().to_vec(),
            actions: table
                .actions()
                .map(|(id, name)| ActionEntry {
                    id,
                    name: name.to_string(),
                })
                .collect(),
            transitions: table.transitions().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }

    /// Rebuild the table, re-checking every transition.
    pub fn into_table(self) -> Result<StateTable, SnapshotError> {
        let mut table = StateTable::new();
        for state in self.states {
            table.add_state(state.id, state.name);
        }
        for action in self.actions {
            table.name_action(action.id, action.name);
        }
        for transition in self.transitions {
            table.add_transition(transition.action, transition.from, transition.to)?;
        }
        Ok(table)
    }
}

impl From<&StateTable> for TableSnapshot {
    fn from(table: &StateTable) -> Self {
        Self::of(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::core::{Action, State, StateId};
    use crate::error::FsmError;
    use crate::{action_enum, state_enum};

    state_enum! {
        enum Level {
            Loading,
            Playing,
            Paused,
            Won,
        }
    }

    action_enum! {
        enum LevelAction {
            Loaded,
            Pause,
            Resume,
            Clear,
        }
    }

    fn level_table() -> StateTable {
        TableBuilder::new()
            .typed_transition(&LevelAction::Loaded, &Level::Loading, &Level::Playing)
            .typed_transition(&LevelAction::Pause, &Level::Playing, &Level::Paused)
            .typed_transition(&LevelAction::Resume, &Level::Paused, &Level::Playing)
            .typed_transition(&LevelAction::Clear, &Level::Playing, &Level::Won)
            .build()
            .unwrap()
    }

    #[test]
    fn snapshot_captures_table_shape() {
        let snapshot = TableSnapshot::of(&level_table());

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.states.len(), 4);
        assert_eq!(snapshot.transitions.len(), 4);
        assert_eq!(snapshot.actions[1].name, "Pause");
        assert!(uuid::Uuid::parse_str(&snapshot.id).is_ok());
    }

    #[test]
    fn binary_snapshot_restores_lookups() {
        let bytes = TableSnapshot::of(&level_table()).to_bytes().unwrap();
        let table = TableSnapshot::from_bytes(&bytes)
            .unwrap()
            .into_table()
            .unwrap();

        let transition = table
            .transition(LevelAction::Resume.id(), Level::Paused.id())
            .unwrap()
            .copied();
        assert_eq!(transition.map(|t| t.to), Some(Level::Playing.id()));
        assert_eq!(table.action_name(LevelAction::Clear.id()), "Clear");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = TableSnapshot::of(&level_table());
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let result = TableSnapshot::from_json(&json);

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn duplicate_transition_in_snapshot_is_invalid() {
        let mut snapshot = TableSnapshot::of(&level_table());
        let first = snapshot.transitions[0];
        snapshot.transitions.push(first);

        let result = snapshot.into_table();

        assert!(matches!(
            result,
            Err(SnapshotError::Invalid(FsmError::DuplicateTransition { .. }))
        ));
    }

    #[test]
    fn transition_to_missing_state_is_invalid() {
        let mut snapshot = TableSnapshot::of(&level_table());
        snapshot.states.retain(|s| s.id != StateId(3));

        assert!(matches!(
            snapshot.into_table(),
            Err(SnapshotError::Invalid(FsmError::UnknownState { .. }))
        ));
    }

    #[test]
    fn garbage_json_is_a_deserialization_error() {
        assert!(matches!(
            TableSnapshot::from_json("not json"),
            Err(SnapshotError::Deserialization(_))
        ));
    }
}

//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by both machine variants.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use statebind::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "name": "camera", "record_history": true }"#).unwrap();
/// assert_eq!(config.name, "camera");
/// assert!(config.record_history);
/// assert_eq!(config.history_capacity, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Label attached to every log event the machine emits
    pub name: String,

    /// Whether transitions are appended to the machine's history
    pub record_history: bool,

    /// Maximum number of history entries kept, unbounded when `None`
    pub history_capacity: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "fsm".to_string(),
            record_history: false,
            history_capacity: None,
        }
    }
}

impl MachineConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enable history recording, bounded by `capacity` when given.
    pub fn with_history(mut self, capacity: Option<usize>) -> Self {
        self.record_history = true;
        self.history_capacity = capacity;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

//! Snapshot error types.

use crate::error::FsmError;
use thiserror::Error;

/// Errors that can occur while exporting or importing table snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot describes a table that cannot be rebuilt
    #[error("Snapshot is not a valid table: {0}")]
    Invalid(#[from] FsmError),
}

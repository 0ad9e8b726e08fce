//! Snapshot and resume functionality for paused runs.
//!
//! A driver that pauses between steps (an animated visualizer does) can
//! capture the run, keep or ship it, and rebuild a running run later
//! against the same table and definition. Snapshots
//! are the only place the crate touches a clock or generates an
//! identifier; the engines themselves stay pure.

use crate::core::{Stack, State, Trace};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a paused run.
///
/// Does NOT include the table or definition; resuming re-validates the
/// snapshot against the table and definition the caller supplies.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::DfaBuilder;
/// use lockstep::checkpoint::RunSnapshot;
/// use lockstep::core::DfaKey;
/// use lockstep::DfaRun;
///
/// let (definition, table) = DfaBuilder::new()
///     .states(["q0", "q1"])
///     .symbols(['a'])
///     .start("q0")
///     .accepting(["q1"])
///     .rule("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// let run = DfaRun::new(&table, &definition, "a");
/// let snapshot = run.snapshot().unwrap();
///
/// let json = snapshot.to_json().unwrap();
/// let restored: RunSnapshot<DfaKey> = RunSnapshot::from_json(&json).unwrap();
/// assert_eq!(restored.remaining, "a");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSnapshot<K> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was created
    pub created_at: DateTime<Utc>,

    /// State the run was paused in
    pub current: State,

    /// Input not yet consumed
    pub remaining: String,

    /// Stack contents for pushdown runs; `None` for finite runs
    pub stack: Option<Stack>,

    /// Transitions taken before the pause
    pub trace: Trace<K>,
}

impl<K> RunSnapshot<K>
where
    K: Serialize + DeserializeOwned,
{
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from binary, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Check the snapshot was written by a supported format version.
    pub fn validate_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

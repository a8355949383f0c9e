//! Action history: snapshots of the character taken before each mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::Character;
use tally_mechanics::BoundedLog;

/// Default number of snapshots kept.
pub const ACTION_HISTORY_CAPACITY: usize = 5;

/// The character as it was just before an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// What was about to change, e.g. `"HP Change"`.
    pub action: String,
    /// An owned copy of the whole character record.
    pub state: Character,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

/// Undo stack, newest snapshot first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionHistory {
    log: BoundedLog<Snapshot>,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new(ACTION_HISTORY_CAPACITY)
    }
}

impl ActionHistory {
    /// An empty history holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            log: BoundedLog::new(capacity),
        }
    }

    /// Record the character's current state under `action`.
    pub fn snapshot(&mut self, action: impl Into<String>, character: &Character) {
        let action = action.into();
        tracing::debug!(action = %action, hp = character.hp, "snapshot");
        self.log.push(Snapshot {
            action,
            state: character.clone(),
            timestamp: Utc::now(),
        });
    }

    /// Pop the newest snapshot and hand its state to `apply`, which must
    /// replace the live character wholesale. Returns the undone action, or
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, apply: impl FnOnce(Character)) -> Option<String> {
        let Snapshot { action, state, .. } = self.log.pop()?;
        tracing::debug!(action = %action, "undo");
        apply(state);
        Some(action)
    }

    /// The newest snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.log.latest()
    }

    /// Snapshots from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.log.iter()
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Change the capacity, dropping the oldest snapshots if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.log.set_capacity(capacity);
    }
}

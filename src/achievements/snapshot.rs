//! Progress snapshots from the activity feed
//!
//! Snapshots are validated at ingestion. The progress book keeps the highest
//! value seen per (user, achievement) so progress never regresses.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AchievementError, Result};

/// Raw metric value for one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub achievement_id: String,
    pub current_value: f64,
}

impl ProgressSnapshot {
    /// Create a snapshot, rejecting negative or non-finite values
    pub fn new(achievement_id: impl Into<String>, current_value: f64) -> Result<Self> {
        let snapshot = Self {
            achievement_id: achievement_id.into(),
            current_value,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check a deserialized snapshot before it reaches the resolver
    pub fn validate(&self) -> Result<()> {
        if self.current_value.is_finite() && self.current_value >= 0.0 {
            Ok(())
        } else {
            Err(AchievementError::NegativeProgress {
                id: self.achievement_id.clone(),
                value: self.current_value,
            })
        }
    }
}

/// Latest accepted progress per user and achievement
#[derive(Debug, Default)]
pub struct ProgressBook {
    values: Mutex<HashMap<(String, String), f64>>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(String, String), f64>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a snapshot and return the effective value.
    ///
    /// A value below the stored one is ignored; the stored value is returned.
    pub fn observe(&self, user_id: &str, snapshot: &ProgressSnapshot) -> Result<f64> {
        snapshot.validate()?;

        let mut values = self.lock();
        let entry = values
            .entry((user_id.to_string(), snapshot.achievement_id.clone()))
            .or_insert(0.0);

        if snapshot.current_value < *entry {
            debug!(
                user_id,
                achievement = %snapshot.achievement_id,
                stored = *entry,
                received = snapshot.current_value,
                "Ignoring regressing progress value"
            );
        } else {
            *entry = snapshot.current_value;
        }
        Ok(*entry)
    }

    /// Stored value, 0 if nothing was observed
    pub fn value(&self, user_id: &str, achievement_id: &str) -> f64 {
        self.lock()
            .get(&(user_id.to_string(), achievement_id.to_string()))
            .copied()
            .unwrap_or(0.0)
    }
}

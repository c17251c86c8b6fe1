//! Unlock ledger - per-user unlock records and worn badges
//!
//! One record per (user, achievement). Tiered records are upgraded in place
//! as higher tiers are reached; tiers and timestamps never move backward.
//! All mutation happens under a single mutex so concurrent feed events
//! cannot race the "never decrease tier" check.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use super::catalog::BadgeCatalog;
use super::definitions::AchievementDef;

/// When an achievement (and tier) was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRecord {
    pub achievement_id: String,
    /// First unlock, ms since epoch
    pub unlocked_at: i64,
    /// Highest tier reached; None for flat achievements
    pub tier_reached: Option<u32>,
    /// When `tier_reached` was first reached, ms since epoch
    pub tier_reached_at: i64,
}

/// Result of a `record_unlock` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// First record for this achievement
    Created,
    /// Existing record moved to a higher tier
    TierAdvanced { from: u32, to: u32 },
    /// Nothing changed
    Unchanged,
}

#[derive(Debug, Default)]
struct UserLedger {
    records: HashMap<String, UnlockRecord>,
    worn: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct UnlockLedger {
    wearable: HashSet<String>,
    users: Mutex<HashMap<String, UserLedger>>,
}

impl UnlockLedger {
    /// Create a ledger with the allow-list of badges that can be worn
    pub fn new<I, S>(wearable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            wearable: wearable.into_iter().map(Into::into).collect(),
            users: Mutex::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UserLedger>> {
        self.users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or upgrade an unlock record.
    ///
    /// `tier` is None for flat achievements. `Some(0)` means nothing was
    /// reached and is ignored. Callers check eligibility with the resolver
    /// first; the ledger does not re-validate thresholds.
    pub fn record_unlock(
        &self,
        user_id: &str,
        achievement_id: &str,
        tier: Option<u32>,
        timestamp: i64,
    ) -> UnlockOutcome {
        if tier == Some(0) {
            return UnlockOutcome::Unchanged;
        }

        let mut users = self.lock();
        let user = users.entry(user_id.to_string()).or_default();

        let record = match user.records.entry(achievement_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(UnlockRecord {
                    achievement_id: achievement_id.to_string(),
                    unlocked_at: timestamp,
                    tier_reached: tier,
                    tier_reached_at: timestamp,
                });
                info!(user_id, achievement_id, ?tier, "Achievement unlocked");
                return UnlockOutcome::Created;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        match (record.tier_reached, tier) {
            (Some(from), Some(to)) if to > from => {
                record.tier_reached = Some(to);
                record.tier_reached_at = record.tier_reached_at.max(timestamp);
                info!(user_id, achievement_id, from, to, "Achievement tier advanced");
                UnlockOutcome::TierAdvanced { from, to }
            }
            _ => {
                debug!(user_id, achievement_id, ?tier, "Unlock already recorded");
                UnlockOutcome::Unchanged
            }
        }
    }

    pub fn record(&self, user_id: &str, achievement_id: &str) -> Option<UnlockRecord> {
        self.lock()
            .get(user_id)
            .and_then(|u| u.records.get(achievement_id))
            .cloned()
    }

    /// All records for a user, most recent unlock first
    pub fn records(&self, user_id: &str) -> Vec<UnlockRecord> {
        let mut records: Vec<UnlockRecord> = self
            .lock()
            .get(user_id)
            .map(|u| u.records.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| {
            b.unlocked_at
                .cmp(&a.unlocked_at)
                .then_with(|| a.achievement_id.cmp(&b.achievement_id))
        });
        records
    }

    pub fn is_unlocked(&self, user_id: &str, achievement_id: &str) -> bool {
        self.lock()
            .get(user_id)
            .is_some_and(|u| u.records.contains_key(achievement_id))
    }

    pub fn unlocked_count(&self, user_id: &str) -> usize {
        self.lock().get(user_id).map_or(0, |u| u.records.len())
    }

    /// Whether a badge may be shown next to a username (independent of tier)
    pub fn is_wearable(&self, achievement_id: &str) -> bool {
        self.wearable.contains(achievement_id)
    }

    /// Flip a badge in the user's worn set. Returns true if it is now worn.
    pub fn toggle_worn(&self, user_id: &str, achievement_id: &str) -> bool {
        let mut users = self.lock();
        let user = users.entry(user_id.to_string()).or_default();
        let worn = if user.worn.remove(achievement_id) {
            false
        } else {
            user.worn.insert(achievement_id.to_string());
            true
        };
        debug!(user_id, achievement_id, worn, "Toggled worn badge");
        worn
    }

    pub fn worn_badges(&self, user_id: &str) -> HashSet<String> {
        self.lock()
            .get(user_id)
            .map(|u| u.worn.clone())
            .unwrap_or_default()
    }

    /// Badges to show next to a username.
    ///
    /// Wearable, unlocked and worn; catalog order; at most `max` entries.
    pub fn displayed_badges<'c>(
        &self,
        user_id: &str,
        catalog: &'c BadgeCatalog,
        max: usize,
    ) -> Vec<(&'c AchievementDef, UnlockRecord)> {
        let users = self.lock();
        let Some(user) = users.get(user_id) else {
            return Vec::new();
        };

        catalog
            .all()
            .filter(|def| self.is_wearable(&def.id) && user.worn.contains(&def.id))
            .filter_map(|def| user.records.get(&def.id).map(|r| (def, r.clone())))
            .take(max)
            .collect()
    }
}

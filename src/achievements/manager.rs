//! Achievement Manager - core gamification flow
//!
//! Takes progress snapshots from the activity feed, resolves them against
//! the catalog and records unlocks, reporting what changed.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::catalog::BadgeCatalog;
use super::definitions::AchievementDef;
use super::error::{AchievementError, Result};
use super::ledger::{UnlockLedger, UnlockOutcome, UnlockRecord};
use super::resolver::{resolve_value, TierResolution};
use super::snapshot::{ProgressBook, ProgressSnapshot};

/// Events produced while ingesting progress
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GamificationEvent {
    /// First threshold crossed (tier is the highest reached, None for flat)
    AchievementUnlocked {
        achievement_id: String,
        tier: Option<u32>,
        at: i64,
    },
    /// An unlocked tiered achievement reached a higher tier
    TierAdvanced {
        achievement_id: String,
        from: u32,
        to: u32,
        at: i64,
    },
}

impl GamificationEvent {
    pub fn achievement_id(&self) -> &str {
        match self {
            Self::AchievementUnlocked { achievement_id, .. }
            | Self::TierAdvanced { achievement_id, .. } => achievement_id,
        }
    }

    pub fn at(&self) -> i64 {
        match self {
            Self::AchievementUnlocked { at, .. } | Self::TierAdvanced { at, .. } => *at,
        }
    }
}

/// Outcome of a batch ingest
#[derive(Debug, Default)]
pub struct IngestReport {
    pub events: Vec<GamificationEvent>,
    /// Snapshots that were skipped (unknown id, invalid value)
    pub rejected: Vec<AchievementError>,
}

/// One achievement card on the board
#[derive(Debug, Clone)]
pub struct AchievementView<'c> {
    pub achievement: &'c AchievementDef,
    pub resolution: TierResolution,
    pub record: Option<UnlockRecord>,
}

/// Achievements of one category with the unlocked count
#[derive(Debug, Clone)]
pub struct CategoryBoard<'c> {
    pub name: &'c str,
    pub unlocked: usize,
    pub total: usize,
    pub achievements: Vec<AchievementView<'c>>,
}

/// Main manager for achievement progress and unlocks
pub struct AchievementManager {
    catalog: Arc<BadgeCatalog>,
    ledger: UnlockLedger,
    progress: ProgressBook,
}

impl AchievementManager {
    pub fn new(catalog: Arc<BadgeCatalog>, ledger: UnlockLedger) -> Self {
        Self {
            catalog,
            ledger,
            progress: ProgressBook::new(),
        }
    }

    /// Current timestamp in milliseconds
    pub fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &UnlockLedger {
        &self.ledger
    }

    /// Apply one snapshot and record any unlock it causes
    pub fn ingest(
        &self,
        user_id: &str,
        snapshot: &ProgressSnapshot,
        timestamp: i64,
    ) -> Result<Vec<GamificationEvent>> {
        let achievement = self.catalog.get(&snapshot.achievement_id)?;
        let value = self.progress.observe(user_id, snapshot)?;

        let resolution = resolve_value(achievement, value);
        if !resolution.is_unlocked() {
            debug!(user_id, achievement = %achievement.id, value, "Achievement still locked");
            return Ok(Vec::new());
        }

        let outcome = self.ledger.record_unlock(
            user_id,
            &achievement.id,
            resolution.ledger_tier(),
            timestamp,
        );

        let event = match outcome {
            UnlockOutcome::Created => GamificationEvent::AchievementUnlocked {
                achievement_id: achievement.id.clone(),
                tier: resolution.ledger_tier(),
                at: timestamp,
            },
            UnlockOutcome::TierAdvanced { from, to } => GamificationEvent::TierAdvanced {
                achievement_id: achievement.id.clone(),
                from,
                to,
                at: timestamp,
            },
            UnlockOutcome::Unchanged => return Ok(Vec::new()),
        };
        Ok(vec![event])
    }

    /// Apply several snapshots; bad ones are skipped and reported
    pub fn ingest_all<'a, I>(&self, user_id: &str, snapshots: I, timestamp: i64) -> IngestReport
    where
        I: IntoIterator<Item = &'a ProgressSnapshot>,
    {
        let mut report = IngestReport::default();
        for snapshot in snapshots {
            match self.ingest(user_id, snapshot, timestamp) {
                Ok(events) => report.events.extend(events),
                Err(err) => {
                    warn!(user_id, "Skipping snapshot: {}", err);
                    report.rejected.push(err);
                }
            }
        }
        report
    }

    /// Stored progress value for an achievement (0 if never observed)
    pub fn progress_value(&self, user_id: &str, achievement_id: &str) -> f64 {
        self.progress.value(user_id, achievement_id)
    }

    /// Resolve using the stored progress
    pub fn resolve_for(&self, user_id: &str, achievement_id: &str) -> Result<TierResolution> {
        let achievement = self.catalog.get(achievement_id)?;
        Ok(resolve_value(
            achievement,
            self.progress.value(user_id, achievement_id),
        ))
    }

    /// Achievements grouped by category, in catalog order
    pub fn board(&self, user_id: &str) -> Vec<CategoryBoard<'_>> {
        self.catalog
            .categories()
            .into_iter()
            .map(|name| {
                let achievements: Vec<AchievementView<'_>> = self
                    .catalog
                    .by_category(name)
                    .map(|achievement| AchievementView {
                        achievement,
                        resolution: resolve_value(
                            achievement,
                            self.progress.value(user_id, &achievement.id),
                        ),
                        record: self.ledger.record(user_id, &achievement.id),
                    })
                    .collect();

                CategoryBoard {
                    name,
                    unlocked: achievements.iter().filter(|v| v.record.is_some()).count(),
                    total: achievements.len(),
                    achievements,
                }
            })
            .collect()
    }
}

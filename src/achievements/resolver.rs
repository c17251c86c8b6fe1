//! Tier resolver
//!
//! Pure mapping from (definition, progress) to unlock state and progress
//! toward the next threshold. No hidden state: the same inputs always give
//! the same resolution.

use serde::Serialize;

use super::definitions::AchievementDef;
use super::snapshot::ProgressSnapshot;

/// Progress toward a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: f64,
    pub required: f64,
    /// 0-100
    pub percent: f64,
}

impl Progress {
    /// Locked progress never reads as complete
    fn locked(current: f64, required: f64) -> Self {
        let mut progress = Self::toward(current, required);
        if progress.percent >= 100.0 {
            progress.percent = f64::from_bits(100.0_f64.to_bits() - 1);
        }
        progress
    }

    fn toward(current: f64, required: f64) -> Self {
        let percent = (100.0 * current / required).clamp(0.0, 100.0);
        Self {
            current,
            required,
            percent,
        }
    }
}

/// Unlock state of one achievement for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TierResolution {
    /// Nothing unlocked yet; progress toward the first threshold if any was made
    Locked { progress: Option<Progress> },
    /// Flat achievement unlocked
    UnlockedFlat,
    /// Tiered achievement with at least tier 1 reached
    UnlockedTiered {
        current_tier: u32,
        /// None once the highest tier is reached
        next_tier: Option<u32>,
        progress_to_next: Option<Progress>,
    },
}

impl TierResolution {
    pub fn is_unlocked(&self) -> bool {
        !matches!(self, Self::Locked { .. })
    }

    /// Reached tier; 0 when locked or flat
    pub fn current_tier(&self) -> u32 {
        match self {
            Self::UnlockedTiered { current_tier, .. } => *current_tier,
            _ => 0,
        }
    }

    /// Progress to show in a progress bar, if any
    pub fn progress(&self) -> Option<&Progress> {
        match self {
            Self::Locked { progress } => progress.as_ref(),
            Self::UnlockedFlat => None,
            Self::UnlockedTiered {
                progress_to_next, ..
            } => progress_to_next.as_ref(),
        }
    }

    /// Highest tier reached with no further tier defined
    pub fn is_max_tier(&self) -> bool {
        matches!(
            self,
            Self::UnlockedTiered {
                next_tier: None,
                ..
            }
        )
    }

    /// Tier to store in the unlock ledger (None for flat)
    pub fn ledger_tier(&self) -> Option<u32> {
        match self {
            Self::UnlockedTiered { current_tier, .. } => Some(*current_tier),
            _ => None,
        }
    }
}

/// Resolve a snapshot against a validated definition
pub fn resolve(achievement: &AchievementDef, snapshot: &ProgressSnapshot) -> TierResolution {
    resolve_value(achievement, snapshot.current_value)
}

/// Resolve a raw metric value against a validated definition
pub fn resolve_value(achievement: &AchievementDef, current_value: f64) -> TierResolution {
    let current = current_value.max(0.0);

    if !achievement.is_tiered {
        let required = achievement.flat_required_value.unwrap_or(f64::INFINITY);
        if current >= required {
            return TierResolution::UnlockedFlat;
        }
        let progress = (current > 0.0).then(|| Progress::locked(current, required));
        return TierResolution::Locked { progress };
    }

    let tiers = achievement.tier_list();
    let reached = tiers
        .iter()
        .rposition(|t| t.threshold_value <= current);

    match reached {
        None => {
            let progress = tiers
                .first()
                .filter(|_| current > 0.0)
                .map(|first| Progress::locked(current, first.threshold_value));
            TierResolution::Locked { progress }
        }
        Some(index) => {
            let next = tiers.get(index + 1);
            TierResolution::UnlockedTiered {
                current_tier: tiers[index].tier,
                next_tier: next.map(|t| t.tier),
                progress_to_next: next
                    .map(|t| Progress::toward(current, t.threshold_value)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tiers() -> AchievementDef {
        AchievementDef::tiered(
            "totalTrades",
            "Trading",
            &[(50.0, "50 Trades"), (200.0, "200 Trades"), (500.0, "500 Trades")],
        )
    }

    #[test]
    fn test_mid_tier_progress() {
        let res = resolve_value(&three_tiers(), 350.0);
        match res {
            TierResolution::UnlockedTiered {
                current_tier,
                next_tier,
                progress_to_next: Some(p),
            } => {
                assert_eq!(current_tier, 2);
                assert_eq!(next_tier, Some(3));
                assert_eq!(p.required, 500.0);
                assert!((p.percent - 70.0).abs() < 1e-9);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn test_flat_unlocked_has_no_progress() {
        let def = AchievementDef::flat("funded", "Milestones", 1.0);
        let res = resolve_value(&def, 1.0);
        assert_eq!(res, TierResolution::UnlockedFlat);
        assert!(res.progress().is_none());
    }

    #[test]
    fn test_flat_locked_progress() {
        let def = AchievementDef::flat("trades", "Milestones", 40.0);
        let res = resolve_value(&def, 10.0);
        let p = res.progress().copied().unwrap();
        assert!((p.percent - 25.0).abs() < 1e-9);
        assert!(!res.is_unlocked());

        let nothing = resolve_value(&def, 0.0);
        assert_eq!(nothing, TierResolution::Locked { progress: None });
    }

    #[test]
    fn test_flat_locked_percent_stays_below_hundred() {
        let def = AchievementDef::flat("trades", "Milestones", 1_000_000.0);
        let res = resolve_value(&def, 999_999.999_999);
        assert!(res.progress().unwrap().percent < 100.0);
    }

    #[test]
    fn test_zero_value_is_locked() {
        let res = resolve_value(&three_tiers(), 0.0);
        assert_eq!(res, TierResolution::Locked { progress: None });
        assert_eq!(res.current_tier(), 0);
        assert_eq!(res.ledger_tier(), None);
    }

    #[test]
    fn test_locked_tiered_progress_toward_first_tier() {
        let res = resolve_value(&three_tiers(), 30.0);
        let p = res.progress().copied().unwrap();
        assert_eq!(p.required, 50.0);
        assert!((p.percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_tier_is_terminal() {
        let res = resolve_value(&three_tiers(), 500.0);
        assert_eq!(
            res,
            TierResolution::UnlockedTiered {
                current_tier: 3,
                next_tier: None,
                progress_to_next: None,
            }
        );
        assert!(res.is_max_tier());
        assert_eq!(resolve_value(&three_tiers(), 10_000.0), res);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let def = three_tiers();
        assert_eq!(resolve_value(&def, 50.0).current_tier(), 1);
        assert_eq!(resolve_value(&def, 49.999).current_tier(), 0);
        assert_eq!(resolve_value(&def, 200.0).current_tier(), 2);
    }

    #[test]
    fn test_current_tier_is_highest_met() {
        let def = three_tiers();
        for value in [0.0, 1.0, 49.0, 50.0, 120.0, 199.0, 200.0, 499.0, 500.0, 900.0] {
            let expected = def
                .tier_list()
                .iter()
                .filter(|t| t.threshold_value <= value)
                .map(|t| t.tier)
                .max()
                .unwrap_or(0);
            assert_eq!(resolve_value(&def, value).current_tier(), expected, "value {value}");
        }
    }

    #[test]
    fn test_tier_is_monotonic_in_value() {
        let def = three_tiers();
        let mut last = 0;
        let mut value = 0.0;
        while value <= 600.0 {
            let tier = resolve_value(&def, value).current_tier();
            assert!(tier >= last);
            last = tier;
            value += 7.5;
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let def = three_tiers();
        let snapshot = ProgressSnapshot::new("totalTrades", 123.0).unwrap();
        assert_eq!(resolve(&def, &snapshot), resolve(&def, &snapshot));
    }

    #[test]
    fn test_non_contiguous_tier_numbers() {
        let mut def = three_tiers();
        if let Some(tiers) = def.tiers.as_mut() {
            tiers[1].tier = 5;
            tiers[2].tier = 9;
        }
        let res = resolve_value(&def, 250.0);
        assert_eq!(res.current_tier(), 5);
        assert!(matches!(res, TierResolution::UnlockedTiered { next_tier: Some(9), .. }));
    }
}

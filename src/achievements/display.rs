//! Display helpers for achievement cards and worn badges

use super::definitions::AchievementDef;
use super::resolver::{Progress, TierResolution};

/// Requirement line shown under an achievement name.
///
/// Unlocked tiered achievements show the tier already reached, not the
/// next one; locked ones show what tier 1 needs.
pub fn requirement_text(achievement: &AchievementDef, resolution: &TierResolution) -> String {
    if !achievement.is_tiered {
        return achievement.description.clone();
    }

    let tier = match resolution {
        TierResolution::UnlockedTiered { current_tier, .. } => achievement.tier(*current_tier),
        _ => achievement.tier_list().first(),
    };

    match tier {
        Some(tier) => format!("Make {}", tier.label.to_lowercase()),
        None => achievement.description.clone(),
    }
}

/// Line describing the next tier, e.g. "Next: 500 Trades"
pub fn next_tier_text(achievement: &AchievementDef, resolution: &TierResolution) -> Option<String> {
    match resolution {
        TierResolution::UnlockedTiered {
            next_tier: Some(next),
            ..
        } => achievement
            .tier(*next)
            .map(|tier| format!("Next: {}", tier.label)),
        TierResolution::UnlockedTiered { next_tier: None, .. } => {
            Some("Max tier achieved!".to_string())
        }
        _ => None,
    }
}

/// Filled and empty stars, one per tier
pub fn tier_stars(current_tier: u32, max_tiers: u32) -> String {
    (1..=max_tiers)
        .map(|tier| if tier <= current_tier { '★' } else { '☆' })
        .collect()
}

/// Name shown in a worn badge tooltip.
///
/// Tiered badges are prefixed with their current tier label, unless the
/// label already ends with the badge name.
pub fn worn_badge_label(achievement: &AchievementDef, tier_reached: Option<u32>) -> String {
    let name = achievement.display_name();
    let label = tier_reached
        .filter(|_| achievement.is_tiered)
        .and_then(|tier| achievement.tier(tier))
        .map(|tier| tier.label.as_str());

    match label {
        Some(label) if !label.ends_with(name) => format!("{} {}", label, name),
        Some(label) => label.to_string(),
        None => name.to_string(),
    }
}

/// Short form of a worn badge's tier threshold, e.g. "10K"
pub fn worn_badge_caption(achievement: &AchievementDef, tier_reached: Option<u32>) -> Option<String> {
    tier_reached
        .and_then(|tier| achievement.tier(tier))
        .map(|tier| abbreviate_number(tier.threshold_value))
}

/// Compact number: 1500 -> "1.5K", 50000 -> "50K", 2000000 -> "2M"
pub fn abbreviate_number(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [
        (1.0, ""),
        (1_000.0, "K"),
        (1_000_000.0, "M"),
        (1_000_000_000.0, "B"),
    ];

    let scale = |(divisor, suffix): (f64, &'static str)| {
        ((value / divisor * 10.0).round() / 10.0, suffix)
    };

    // Pick the unit after rounding so 999_950 reads "1M", not "1000K"
    let (rounded, suffix) = UNITS
        .into_iter()
        .map(scale)
        .find(|(rounded, _)| rounded.abs() < 1_000.0)
        .unwrap_or_else(|| scale(UNITS[UNITS.len() - 1]));
    format!("{}{}", trim_decimal(rounded), suffix)
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{:.1}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// "350 / 500 (70%)"
pub fn progress_line(progress: &Progress) -> String {
    format!(
        "{} / {} ({:.0}%)",
        trim_decimal(progress.current),
        trim_decimal(progress.required),
        progress.percent.floor()
    )
}

/// Text progress bar, e.g. "[######----]"
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

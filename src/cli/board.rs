//! Board command implementation

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tradequest::achievements::{
    display, AchievementManager, ProgressSnapshot, TierResolution, TradingLevel, UnlockRecord,
};
use tradequest::config::Config;
use tradequest::notifications::{self, Notification, NotificationFeed};

/// Contents of the board input file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInput {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub snapshots: Vec<ProgressSnapshot>,
    /// Badges the user chose to wear
    #[serde(default)]
    pub worn: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReport {
    pub level: &'static TradingLevel,
    pub xp: u32,
    pub progress: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeReport {
    pub achievement_id: String,
    pub label: String,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReport {
    pub achievement_id: String,
    pub icon: String,
    pub name: String,
    pub requirement: String,
    pub next_tier: Option<String>,
    pub max_tiers: u32,
    pub resolution: TierResolution,
    pub record: Option<UnlockRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub name: String,
    pub unlocked: usize,
    pub total: usize,
    pub achievements: Vec<CardReport>,
}

/// Everything the board shows for one user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardReport {
    pub user_id: String,
    pub username: Option<String>,
    pub level: LevelReport,
    pub badges: Vec<BadgeReport>,
    pub categories: Vec<CategoryReport>,
    pub notifications: Vec<Notification>,
    pub rejected: Vec<String>,
    #[serde(skip)]
    pub generated_at: i64,
}

/// Ingest the input's snapshots and collect the resulting board
pub fn build_report(config: &Config, input: &BoardInput, timestamp: i64) -> Result<BoardReport> {
    let manager = config.build_manager()?;
    let user_id = input.user_id.as_str();

    let report = manager.ingest_all(user_id, &input.snapshots, timestamp);
    info!(
        user_id,
        events = report.events.len(),
        rejected = report.rejected.len(),
        "Ingested progress"
    );

    let mut feed = NotificationFeed::new();
    for event in &report.events {
        let achievement = manager.catalog().get(event.achievement_id())?;
        let wearable = manager.ledger().is_wearable(&achievement.id);
        feed.push(Notification::from_event(event, achievement, wearable));
    }

    // `worn` lists badges to wear, so repeats must not toggle them back off
    for badge in &input.worn {
        if !manager.ledger().is_wearable(badge) {
            warn!(user_id, badge = %badge, "Badge is not wearable");
            continue;
        }
        if !manager.ledger().worn_badges(user_id).contains(badge) {
            manager.ledger().toggle_worn(user_id, badge);
        }
    }

    let badges = manager
        .ledger()
        .displayed_badges(user_id, manager.catalog(), config.settings.max_worn_badges)
        .into_iter()
        .map(|(achievement, record)| BadgeReport {
            achievement_id: achievement.id.clone(),
            label: display::worn_badge_label(achievement, record.tier_reached),
            caption: display::worn_badge_caption(achievement, record.tier_reached),
        })
        .collect();

    let categories = manager
        .board(user_id)
        .into_iter()
        .map(|category| CategoryReport {
            name: category.name.to_string(),
            unlocked: category.unlocked,
            total: category.total,
            achievements: category
                .achievements
                .into_iter()
                .map(|view| CardReport {
                    achievement_id: view.achievement.id.clone(),
                    icon: view.achievement.icon.clone(),
                    name: view.achievement.display_name().to_string(),
                    requirement: display::requirement_text(view.achievement, &view.resolution),
                    next_tier: display::next_tier_text(view.achievement, &view.resolution),
                    max_tiers: view.achievement.max_tiers(),
                    resolution: view.resolution,
                    record: view.record,
                })
                .collect(),
        })
        .collect();

    let level = TradingLevel::for_xp(input.xp);

    Ok(BoardReport {
        user_id: input.user_id.clone(),
        username: input.username.clone(),
        level: LevelReport {
            level,
            xp: input.xp,
            progress: level.progress(input.xp),
        },
        badges,
        categories,
        notifications: feed.list().into_iter().cloned().collect(),
        rejected: report.rejected.iter().map(|e| e.to_string()).collect(),
        generated_at: timestamp,
    })
}

/// Render the board as text
pub fn render(report: &BoardReport) -> String {
    let mut out = String::new();
    let name = report.username.as_deref().unwrap_or(&report.user_id);
    let level = report.level.level;

    let _ = writeln!(out, "{} {}", level.icon, name);
    let _ = writeln!(
        out,
        "  {} ({}) - {} XP {}",
        level.name,
        level.title,
        report.level.xp,
        display::progress_bar(report.level.progress, 20)
    );

    if !report.badges.is_empty() {
        let labels: Vec<String> = report
            .badges
            .iter()
            .map(|b| match &b.caption {
                Some(caption) => format!("{} ({})", b.label, caption),
                None => b.label.clone(),
            })
            .collect();
        let _ = writeln!(out, "  Badges: {}", labels.join(", "));
    }

    for category in &report.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}/{}", category.name, category.unlocked, category.total);

        for card in &category.achievements {
            let state = match &card.resolution {
                TierResolution::Locked { .. } => "locked".to_string(),
                TierResolution::UnlockedFlat => "unlocked".to_string(),
                TierResolution::UnlockedTiered { current_tier, .. } => {
                    display::tier_stars(*current_tier, card.max_tiers)
                }
            };
            let _ = writeln!(out, "  {} {} [{}]", card.icon, card.name, state);
            let _ = writeln!(out, "      {}", card.requirement);

            if let Some(progress) = card.resolution.progress() {
                let _ = writeln!(
                    out,
                    "      {} {}",
                    display::progress_bar(progress.percent, 20),
                    display::progress_line(progress)
                );
            }
            if let Some(next) = &card.next_tier {
                if card.resolution.is_unlocked() {
                    let _ = writeln!(out, "      {}", next);
                }
            }
            if let Some(record) = &card.record {
                let _ = writeln!(
                    out,
                    "      Unlocked {}",
                    notifications::format_date(record.unlocked_at)
                );
            }
        }
    }

    if !report.notifications.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notifications");
        for notification in &report.notifications {
            let _ = writeln!(
                out,
                "  {} {} {} ({})",
                notification.icon,
                notification.title,
                notification.message,
                notifications::relative_time(notification.timestamp, report.generated_at)
            );
        }
    }

    if !report.rejected.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Skipped snapshots");
        for reason in &report.rejected {
            let _ = writeln!(out, "  {}", reason);
        }
    }

    out
}

/// Load the input file, ingest it and print the board
pub fn board_command(config: &Config, input_path: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read board input: {}", input_path.display()))?;
    let input: BoardInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse board input: {}", input_path.display()))?;

    let report = build_report(config, &input, AchievementManager::now_ms())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }

    Ok(())
}

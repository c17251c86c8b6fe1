//! Unlock notifications with read flags and deep links
//!
//! Each notification can point at the page (and achievement) it refers to,
//! so opening it can jump straight to the right card.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::achievements::{AchievementDef, GamificationEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    /// Achievement unlocked for the first time
    Achievement,
    /// Wearable badge earned
    Badge,
    /// Tiered achievement reached a higher tier
    TierUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetPage {
    Achievements,
    Profile,
}

impl TargetPage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Achievements => "achievements",
            Self::Profile => "profile",
        }
    }
}

/// Where opening a notification should lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLink {
    pub page: TargetPage,
    /// Card to scroll to
    pub achievement_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    /// ms since epoch
    pub timestamp: i64,
    pub read: bool,
    pub target: Option<DeepLink>,
}

impl Notification {
    /// Build a notification for a gamification event.
    ///
    /// The id is assigned when the notification is pushed to a feed.
    pub fn from_event(
        event: &GamificationEvent,
        achievement: &AchievementDef,
        wearable: bool,
    ) -> Self {
        let name = achievement.display_name();
        let (kind, title, message, page) = match event {
            GamificationEvent::AchievementUnlocked { .. } if wearable => (
                NotificationKind::Badge,
                "New Badge Earned!".to_string(),
                format!("You earned the '{}' badge!", name),
                TargetPage::Profile,
            ),
            GamificationEvent::AchievementUnlocked { .. } => (
                NotificationKind::Achievement,
                "Achievement Unlocked!".to_string(),
                format!("You unlocked the '{}' achievement!", name),
                TargetPage::Achievements,
            ),
            GamificationEvent::TierAdvanced { to, .. } => (
                NotificationKind::TierUp,
                "Tier Up!".to_string(),
                format!("'{}' reached tier {}!", name, to),
                TargetPage::Achievements,
            ),
        };

        Self {
            id: String::new(),
            kind,
            title,
            message,
            icon: achievement.icon.clone(),
            timestamp: event.at(),
            read: false,
            target: Some(DeepLink {
                page,
                achievement_id: Some(achievement.id.clone()),
            }),
        }
    }
}

/// A user's notifications
#[derive(Debug, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and return its assigned id
    pub fn push(&mut self, mut notification: Notification) -> String {
        self.next_id += 1;
        notification.id = format!("notif{}", self.next_id);
        let id = notification.id.clone();
        debug!(id = %id, kind = ?notification.kind, "Notification added");
        self.items.push(notification);
        id
    }

    /// Newest first; ties keep the latest pushed first
    pub fn list(&self) -> Vec<&Notification> {
        let mut items: Vec<&Notification> = self.items.iter().rev().collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Returns false for an unknown id.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
    }

    /// Open a notification: mark it read and return where it points
    pub fn open(&mut self, id: &str) -> Option<DeepLink> {
        let notification = self.items.iter_mut().find(|n| n.id == id)?;
        notification.read = true;
        notification.target.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// "Just now", "5m ago", "3h ago", "2d ago", or the date after a week
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = (now_ms - timestamp_ms).max(0);
    let minutes = diff / 60_000;
    let hours = diff / 3_600_000;
    let days = diff / 86_400_000;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        format_date(timestamp_ms)
    }
}

/// "Oct 19, 2026"
pub fn format_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

//! Trading levels
//!
//! Maps community XP to a trader level (Bronze through Master).

use serde::Serialize;

/// Level definition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingLevel {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub min_xp: u32,
    /// Inclusive upper bound; the top level is open-ended
    pub max_xp: u32,
    pub icon: &'static str,
}

/// All level definitions (must be sorted by min_xp)
pub static TRADING_LEVELS: &[TradingLevel] = &[
    TradingLevel {
        id: "bronze",
        name: "Bronze",
        title: "Bronze Trader",
        min_xp: 0,
        max_xp: 999,
        icon: "🥉",
    },
    TradingLevel {
        id: "silver",
        name: "Silver",
        title: "Silver Trader",
        min_xp: 1000,
        max_xp: 2999,
        icon: "🥈",
    },
    TradingLevel {
        id: "gold",
        name: "Gold",
        title: "Gold Trader",
        min_xp: 3000,
        max_xp: 5999,
        icon: "🥇",
    },
    TradingLevel {
        id: "platinum",
        name: "Platinum",
        title: "Platinum Trader",
        min_xp: 6000,
        max_xp: 9999,
        icon: "💠",
    },
    TradingLevel {
        id: "diamond",
        name: "Diamond",
        title: "Diamond Trader",
        min_xp: 10000,
        max_xp: 14999,
        icon: "💎",
    },
    TradingLevel {
        id: "master",
        name: "Master",
        title: "Master Trader",
        min_xp: 15000,
        max_xp: 999_999,
        icon: "👑",
    },
];

impl TradingLevel {
    /// Level for the given XP
    pub fn for_xp(xp: u32) -> &'static TradingLevel {
        TRADING_LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.min_xp)
            .unwrap_or(&TRADING_LEVELS[0])
    }

    /// Following level (None at the top)
    pub fn next(&self) -> Option<&'static TradingLevel> {
        TRADING_LEVELS.iter().find(|l| l.min_xp > self.min_xp)
    }

    pub fn is_max(&self) -> bool {
        self.next().is_none()
    }

    /// Progress through this level in percent (0-100)
    pub fn progress(&self, xp: u32) -> f64 {
        if self.is_max() {
            return 100.0;
        }
        let span = self.max_xp.saturating_sub(self.min_xp);
        if span == 0 {
            return 100.0;
        }
        let into = xp.saturating_sub(self.min_xp);
        (into as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
    }
}

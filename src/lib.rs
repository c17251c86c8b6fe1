//! tradequest - tiered trading achievements
//!
//! Evaluates a trader's progress against a catalog of achievements. Flat
//! achievements unlock once; tiered achievements climb through ordered
//! thresholds ("50 trades", "200 trades", ...).
//!
//! ## Pieces
//!
//! 1. **Catalog**: validated achievement definitions (built-in or loaded
//!    from TOML/JSON).
//! 2. **Resolver**: pure mapping from a progress value to the reached tier
//!    and progress toward the next one.
//! 3. **Ledger**: per-user unlock records and worn badges.
//! 4. **Notifications**: unlock and tier-up messages with deep links.

pub mod achievements;
pub mod config;
pub mod notifications;

pub use achievements::{
    AchievementDef, AchievementError, AchievementManager, BadgeCatalog, GamificationEvent,
    ProgressSnapshot, TierResolution, UnlockLedger,
};

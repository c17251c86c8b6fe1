//! Gamification core: badge catalog, tier resolution, unlock ledger and levels
//!
//! # Flow
//!
//! ```text
//! activity feed ──► ProgressSnapshot ──► AchievementManager::ingest
//!                                              │
//!                     BadgeCatalog ──► resolve (pure) ──► UnlockLedger
//!                                              │
//!                                      GamificationEvent
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let catalog = BadgeCatalog::builtin()?;
//! let manager = AchievementManager::new(catalog, UnlockLedger::new(["funded"]));
//!
//! let snapshot = ProgressSnapshot::new("totalTrades", 350.0)?;
//! let events = manager.ingest("trader-1", &snapshot, AchievementManager::now_ms())?;
//! ```

mod catalog;
mod definitions;
pub mod display;
mod error;
mod ledger;
mod levels;
mod manager;
mod resolver;
mod snapshot;

pub use catalog::{BadgeCatalog, BUILTIN_CATALOG_TOML};
pub use definitions::{AchievementDef, Tier};
pub use error::{AchievementError, Result};
pub use ledger::{UnlockLedger, UnlockOutcome, UnlockRecord};
pub use levels::{TradingLevel, TRADING_LEVELS};
pub use manager::{
    AchievementManager, AchievementView, CategoryBoard, GamificationEvent, IngestReport,
};
pub use resolver::{resolve, resolve_value, Progress, TierResolution};
pub use snapshot::{ProgressBook, ProgressSnapshot};

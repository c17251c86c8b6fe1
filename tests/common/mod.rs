//! Shared test utilities for achievement integration tests

use std::sync::Arc;

use tradequest::achievements::{AchievementDef, AchievementManager, BadgeCatalog, UnlockLedger};

/// Small catalog covering the flat and tiered shapes
pub fn test_catalog() -> BadgeCatalog {
    let mut funded = AchievementDef::flat("funded", "Milestones", 1.0);
    funded.name = "Funded Trader".to_string();

    let mut total_trades = AchievementDef::tiered(
        "totalTrades",
        "Trading",
        &[(50.0, "50 Trades"), (200.0, "200 Trades"), (500.0, "500 Trades")],
    );
    total_trades.name = "Total Trades".to_string();

    BadgeCatalog::new(vec![funded, total_trades]).expect("Test catalog should be valid")
}

/// Manager over `test_catalog` with both achievements wearable
#[allow(dead_code)]
pub fn test_manager() -> AchievementManager {
    AchievementManager::new(
        Arc::new(test_catalog()),
        UnlockLedger::new(["funded", "totalTrades"]),
    )
}

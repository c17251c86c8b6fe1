//! Init command implementation

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use tradequest::config::Config;

/// Default configuration content for tradequest init
pub const DEFAULT_CONFIG: &str = r#"# tradequest configuration
# =======================

# ============================================================================
# SETTINGS
# ============================================================================
#
# Available options:
#   max_worn_badges  - Worn badges shown next to a username (default: 3)
#   catalog_path     - Custom catalog file (.toml or .json); built-in catalog when unset
#   lenient_catalog  - Skip malformed catalog entries instead of failing (default: false)

[settings]
max_worn_badges = 3
# catalog_path = "catalog.toml"
lenient_catalog = false

# ============================================================================
# WEARABLE BADGES
# ============================================================================
#
# Achievements that can be shown next to a username once unlocked.
# Tiered badges display their current tier.

[wearable]
badges = [
    "funded",
    "firstPayout",
    "contest1st",
    "totalTrades",
    "accountDollarProfit",
    "dailyConsistency",
]
"#;

/// Write a default config file (`.tradequest/config.toml` in the work dir)
pub fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path =
        config_path.unwrap_or_else(|| work_dir.join(".tradequest").join("config.toml"));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::write_text(&config_path, DEFAULT_CONFIG)?;
    info!(path = %config_path.display(), "Wrote default configuration");
    println!("Created: {}", config_path.display());

    Ok(())
}

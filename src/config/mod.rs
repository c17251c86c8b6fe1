//! Configuration loading and management

mod io;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::achievements::{AchievementManager, BadgeCatalog, UnlockLedger};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Badges that may be worn next to a username
    #[serde(default)]
    pub wearable: WearableConfig,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum worn badges shown next to a username
    #[serde(default = "default_max_worn_badges")]
    pub max_worn_badges: usize,

    /// Custom catalog file (TOML or JSON). Uses the built-in catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Skip malformed catalog entries instead of refusing the whole catalog
    #[serde(default = "default_lenient_catalog")]
    pub lenient_catalog: bool,
}

/// Wearable badge allow-list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableConfig {
    #[serde(default = "default_wearable_badges")]
    pub badges: Vec<String>,
}

fn default_max_worn_badges() -> usize {
    3
}

fn default_lenient_catalog() -> bool {
    false
}

fn default_wearable_badges() -> Vec<String> {
    [
        "funded",
        "firstPayout",
        "contest1st",
        "totalTrades",
        "accountDollarProfit",
        "dailyConsistency",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_worn_badges: default_max_worn_badges(),
            catalog_path: None,
            lenient_catalog: default_lenient_catalog(),
        }
    }
}

impl Default for WearableConfig {
    fn default() -> Self {
        Self {
            badges: default_wearable_badges(),
        }
    }
}

impl Config {
    /// Load the configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<Arc<BadgeCatalog>> {
        let Some(path) = &self.settings.catalog_path else {
            return BadgeCatalog::builtin().context("Built-in catalog is invalid");
        };

        if !self.settings.lenient_catalog {
            return BadgeCatalog::from_file(path).map(Arc::new);
        }

        let defs = BadgeCatalog::read_defs(path)?;
        let (catalog, rejected) = BadgeCatalog::new_lenient(defs);
        if !rejected.is_empty() {
            warn!(
                "Catalog {}: skipped {} malformed achievement(s)",
                path.display(),
                rejected.len()
            );
        }
        Ok(Arc::new(catalog))
    }

    /// Build a manager from this configuration
    pub fn build_manager(&self) -> Result<AchievementManager> {
        let catalog = self.load_catalog()?;

        for id in &self.wearable.badges {
            if !catalog.contains(id) {
                warn!("Wearable badge '{}' is not in the catalog", id);
            }
        }

        let ledger = UnlockLedger::new(self.wearable.badges.iter().cloned());
        Ok(AchievementManager::new(catalog, ledger))
    }
}

//! Integration tests for loading catalogs and configs from disk

use std::fs;

use tempfile::TempDir;

use tradequest::achievements::{AchievementError, BadgeCatalog, ProgressSnapshot};
use tradequest::config::Config;

const CUSTOM_CATALOG: &str = r#"
[[achievement]]
id = "streak"
name = "Streak"
description = "Trade on consecutive days"
icon = "🔥"
category = "Consistency"
isTiered = true
tiers = [
    { tier = 1, thresholdValue = 3.0, label = "3 Day Streak" },
    { tier = 2, thresholdValue = 10.0, label = "10 Day Streak" },
]

[[achievement]]
id = "broken"
name = "Broken"
description = "Tiers out of order"
icon = "❌"
category = "Consistency"
isTiered = true
tiers = [
    { tier = 1, thresholdValue = 10.0, label = "Ten" },
    { tier = 2, thresholdValue = 5.0, label = "Five" },
]
"#;

#[test]
fn test_builtin_catalog_is_valid() {
    let catalog = BadgeCatalog::builtin().expect("Built-in catalog should load");
    assert!(catalog.contains("funded"));
    assert!(catalog.get("totalTrades").unwrap().is_tiered);
    assert!(catalog.categories().contains(&"Milestones"));
}

#[test]
fn test_strict_file_load_rejects_malformed_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CUSTOM_CATALOG).unwrap();

    let err = BadgeCatalog::from_file(&path).unwrap_err();
    let err = err
        .downcast_ref::<AchievementError>()
        .expect("Error should carry the schema violation");
    assert!(matches!(err, AchievementError::SchemaViolation { id, .. } if id == "broken"));
}

#[test]
fn test_lenient_config_skips_malformed_entry() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.toml");
    fs::write(&catalog_path, CUSTOM_CATALOG).unwrap();

    let mut config = Config::default();
    config.settings.catalog_path = Some(catalog_path);
    config.settings.lenient_catalog = true;
    config.wearable.badges = vec!["streak".to_string()];

    let config_path = dir.path().join(".tradequest/config.toml");
    config.save_to_file(&config_path).unwrap();

    let loaded = Config::from_dir(dir.path()).unwrap();
    let manager = loaded.build_manager().unwrap();
    assert_eq!(manager.catalog().len(), 1);

    let snapshot = ProgressSnapshot::new("streak", 4.0).unwrap();
    let events = manager.ingest("u1", &snapshot, 1).unwrap();
    assert_eq!(events.len(), 1);
    assert!(manager.ledger().is_wearable("streak"));
}

#[test]
fn test_json_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"[{
            "id": "funded",
            "name": "Funded",
            "description": "Get funded",
            "icon": "💲",
            "category": "Milestones",
            "isTiered": false,
            "flatRequiredValue": 1
        }]"#,
    )
    .unwrap();

    let catalog = BadgeCatalog::from_file(&path).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("funded").unwrap().flat_required_value, Some(1.0));
}

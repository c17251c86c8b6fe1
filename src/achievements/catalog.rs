//! Badge catalog - immutable, validated achievement definitions
//!
//! The built-in catalog is embedded at compile time from
//! `assets/catalog.toml`. Custom catalogs can be loaded from TOML or JSON.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::{debug, warn};

use super::definitions::AchievementDef;
use super::error::{AchievementError, Result};

/// Embedded catalog TOML content (compile-time)
pub const BUILTIN_CATALOG_TOML: &str = include_str!("../../assets/catalog.toml");

static BUILTIN: OnceCell<Arc<BadgeCatalog>> = OnceCell::new();

/// TOML layout: one `[[achievement]]` table per definition
#[derive(Debug, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    achievement: Vec<AchievementDef>,
}

/// Validated achievement catalog, ordered as declared
#[derive(Debug, Clone, Default)]
pub struct BadgeCatalog {
    achievements: Vec<AchievementDef>,
    index: HashMap<String, usize>,
}

impl BadgeCatalog {
    /// Build a catalog, failing on the first malformed entry
    pub fn new(defs: Vec<AchievementDef>) -> Result<Self> {
        let mut catalog = Self::default();
        for def in defs {
            def.validate()?;
            catalog.insert(def)?;
        }
        debug!(count = catalog.len(), "Loaded achievement catalog");
        Ok(catalog)
    }

    /// Build a catalog, dropping malformed entries instead of failing.
    ///
    /// Returns the rejected entries' errors so the caller can report them.
    pub fn new_lenient(defs: Vec<AchievementDef>) -> (Self, Vec<AchievementError>) {
        let mut catalog = Self::default();
        let mut rejected = Vec::new();
        for def in defs {
            let outcome = def.validate().and_then(|_| catalog.insert(def));
            if let Err(err) = outcome {
                warn!("Skipping achievement: {}", err);
                rejected.push(err);
            }
        }
        (catalog, rejected)
    }

    fn insert(&mut self, def: AchievementDef) -> Result<()> {
        if self.index.contains_key(&def.id) {
            return Err(AchievementError::schema(&def.id, "duplicate achievement id"));
        }
        self.index.insert(def.id.clone(), self.achievements.len());
        self.achievements.push(def);
        Ok(())
    }

    /// Parse `[[achievement]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::new(Self::defs_from_toml_str(content)?)
    }

    /// Parse a JSON array of achievements
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::new(Self::defs_from_json_str(content)?)
    }

    /// Unvalidated definitions from TOML
    pub fn defs_from_toml_str(content: &str) -> Result<Vec<AchievementDef>> {
        let parsed: CatalogToml = toml::from_str(content)?;
        Ok(parsed.achievement)
    }

    /// Unvalidated definitions from JSON
    pub fn defs_from_json_str(content: &str) -> Result<Vec<AchievementDef>> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read unvalidated definitions from a file.
    ///
    /// `.json` is parsed as JSON, anything else as TOML.
    pub fn read_defs(path: &Path) -> anyhow::Result<Vec<AchievementDef>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let defs = if is_json {
            Self::defs_from_json_str(&content)
        } else {
            Self::defs_from_toml_str(&content)
        };
        defs.with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }

    /// Load and validate a catalog file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let defs = Self::read_defs(path)?;
        Self::new(defs).with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    /// Shared built-in catalog, parsed once
    pub fn builtin() -> Result<Arc<Self>> {
        BUILTIN
            .get_or_try_init(|| Self::from_toml_str(BUILTIN_CATALOG_TOML).map(Arc::new))
            .cloned()
    }

    /// All achievements in declaration order
    pub fn all(&self) -> impl Iterator<Item = &AchievementDef> {
        self.achievements.iter()
    }

    /// Achievements in one category, in declaration order
    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a AchievementDef> + 'a {
        self.achievements
            .iter()
            .filter(move |a| a.category == category)
    }

    /// Look up an achievement by id
    pub fn get(&self, id: &str) -> Result<&AchievementDef> {
        self.index
            .get(id)
            .map(|&i| &self.achievements[i])
            .ok_or_else(|| AchievementError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for a in &self.achievements {
            if !seen.contains(&a.category.as_str()) {
                seen.push(&a.category);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BadgeCatalog {
        BadgeCatalog::new(vec![
            AchievementDef::flat("funded", "Milestones", 1.0),
            AchievementDef::tiered("totalTrades", "Trading", &[(50.0, "50"), (200.0, "200")]),
            AchievementDef::flat("firstPayout", "Milestones", 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = BadgeCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.contains("totalTrades"));
        assert!(catalog.get("funded").is_ok());
        // Same instance on every call
        assert!(Arc::ptr_eq(&catalog, &BadgeCatalog::builtin().unwrap()));
    }

    #[test]
    fn test_order_is_stable_and_restartable() {
        let catalog = sample();
        let first: Vec<_> = catalog.all().map(|a| a.id.as_str()).collect();
        let second: Vec<_> = catalog.all().map(|a| a.id.as_str()).collect();
        assert_eq!(first, vec!["funded", "totalTrades", "firstPayout"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_by_category_preserves_order() {
        let catalog = sample();
        let ids: Vec<_> = catalog.by_category("Milestones").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["funded", "firstPayout"]);
        assert_eq!(catalog.by_category("Nope").count(), 0);
        assert_eq!(catalog.categories(), vec!["Milestones", "Trading"]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let catalog = sample();
        assert!(matches!(
            catalog.get("ghost"),
            Err(AchievementError::NotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = BadgeCatalog::new(vec![
            AchievementDef::flat("funded", "Milestones", 1.0),
            AchievementDef::flat("funded", "Milestones", 2.0),
        ]);
        assert!(matches!(result, Err(AchievementError::SchemaViolation { .. })));
    }

    #[test]
    fn test_lenient_load_drops_bad_entries() {
        let (catalog, rejected) = BadgeCatalog::new_lenient(vec![
            AchievementDef::flat("funded", "Milestones", 1.0),
            AchievementDef::tiered("empty", "Trading", &[]),
            AchievementDef::flat("funded", "Milestones", 1.0),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"[
            { "id": "funded", "category": "Milestones", "isTiered": false, "flatRequiredValue": 1 },
            { "id": "totalTrades", "category": "Trading", "isTiered": true,
              "tiers": [{ "tier": 1, "thresholdValue": 50, "label": "50 Trades" }] }
        ]"#;
        let catalog = BadgeCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let bad = r#"[{ "id": "x", "category": "c", "isTiered": true, "tiers": [] }]"#;
        assert!(matches!(
            BadgeCatalog::from_json_str(bad),
            Err(AchievementError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_catalog_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[achievement]]
id = "funded"
category = "Milestones"
isTiered = false
flatRequiredValue = 1.0
"#,
        )
        .unwrap();
        let catalog = BadgeCatalog::from_file(&path).unwrap();
        assert!(catalog.contains("funded"));

        assert!(BadgeCatalog::from_file(&dir.path().join("missing.toml")).is_err());
    }
}

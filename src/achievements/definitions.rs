//! Achievement definitions and the catalog wire schema
//!
//! A definition is either flat (a single unlock threshold) or tiered
//! (an ordered list of thresholds). The shape matches what catalog authors
//! write in TOML or JSON, so field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use super::error::{AchievementError, Result};

/// One threshold level inside a tiered achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Tier number, starting at 1
    pub tier: u32,
    /// Metric value needed to reach this tier (inclusive)
    pub threshold_value: f64,
    /// Requirement text, e.g. "200 Trades"
    pub label: String,
}

/// Achievement definition with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: String,
    pub is_tiered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_required_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
}

impl AchievementDef {
    /// Build a flat (single threshold) achievement
    pub fn flat(id: &str, category: &str, required: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: String::new(),
            category: category.to_string(),
            is_tiered: false,
            flat_required_value: Some(required),
            tiers: None,
        }
    }

    /// Build a tiered achievement from `(threshold, label)` pairs, numbered from 1
    pub fn tiered(id: &str, category: &str, thresholds: &[(f64, &str)]) -> Self {
        let tiers = thresholds
            .iter()
            .enumerate()
            .map(|(i, (value, label))| Tier {
                tier: i as u32 + 1,
                threshold_value: *value,
                label: label.to_string(),
            })
            .collect();

        Self {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: String::new(),
            category: category.to_string(),
            is_tiered: true,
            flat_required_value: None,
            tiers: Some(tiers),
        }
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Tier list (empty for flat achievements)
    pub fn tier_list(&self) -> &[Tier] {
        self.tiers.as_deref().unwrap_or(&[])
    }

    /// Look up a tier by its number
    pub fn tier(&self, number: u32) -> Option<&Tier> {
        self.tier_list().iter().find(|t| t.tier == number)
    }

    /// Number of tiers, used for star display
    pub fn max_tiers(&self) -> u32 {
        self.tier_list().len() as u32
    }

    /// Threshold for the first unlock (flat requirement or tier 1)
    pub fn first_threshold(&self) -> Option<f64> {
        if self.is_tiered {
            self.tier_list().first().map(|t| t.threshold_value)
        } else {
            self.flat_required_value
        }
    }

    /// Check the flat/tiered invariants.
    ///
    /// Called once when a catalog is loaded; the resolver assumes a
    /// validated definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AchievementError::schema(&self.id, "id must not be empty"));
        }

        if !self.is_tiered {
            if self.tiers.is_some() {
                return Err(AchievementError::schema(
                    &self.id,
                    "flat achievement must not define tiers",
                ));
            }
            return match self.flat_required_value {
                Some(v) if v.is_finite() && v > 0.0 => Ok(()),
                Some(v) => Err(AchievementError::schema(
                    &self.id,
                    format!("flatRequiredValue must be positive, got {v}"),
                )),
                None => Err(AchievementError::schema(
                    &self.id,
                    "flat achievement requires flatRequiredValue",
                )),
            };
        }

        if self.flat_required_value.is_some() {
            return Err(AchievementError::schema(
                &self.id,
                "tiered achievement must not define flatRequiredValue",
            ));
        }

        let tiers = self.tier_list();
        if tiers.is_empty() {
            return Err(AchievementError::schema(
                &self.id,
                "tiered achievement requires at least one tier",
            ));
        }

        let mut prev: Option<&Tier> = None;
        for tier in tiers {
            if tier.tier < 1 {
                return Err(AchievementError::schema(&self.id, "tier numbers start at 1"));
            }
            if !tier.threshold_value.is_finite() || tier.threshold_value <= 0.0 {
                return Err(AchievementError::schema(
                    &self.id,
                    format!(
                        "tier {} threshold must be positive, got {}",
                        tier.tier, tier.threshold_value
                    ),
                ));
            }
            if let Some(prev) = prev {
                if tier.tier <= prev.tier {
                    return Err(AchievementError::schema(
                        &self.id,
                        format!("tier {} follows tier {}", tier.tier, prev.tier),
                    ));
                }
                if tier.threshold_value <= prev.threshold_value {
                    return Err(AchievementError::schema(
                        &self.id,
                        format!(
                            "tier {} threshold {} is not above tier {} threshold {}",
                            tier.tier, tier.threshold_value, prev.tier, prev.threshold_value
                        ),
                    ));
                }
            }
            prev = Some(tier);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_schema_violation(def: &AchievementDef) -> bool {
        matches!(
            def.validate(),
            Err(AchievementError::SchemaViolation { .. })
        )
    }

    #[test]
    fn test_valid_shapes() {
        assert!(AchievementDef::flat("funded", "Milestones", 1.0).validate().is_ok());
        let tiered = AchievementDef::tiered(
            "totalTrades",
            "Trading",
            &[(50.0, "50 Trades"), (200.0, "200 Trades")],
        );
        assert!(tiered.validate().is_ok());
        assert_eq!(tiered.max_tiers(), 2);
        assert_eq!(tiered.tier(2).map(|t| t.threshold_value), Some(200.0));
        assert_eq!(tiered.first_threshold(), Some(50.0));
    }

    #[test]
    fn test_tiered_without_tiers_is_rejected() {
        let mut def = AchievementDef::tiered("empty", "Trading", &[]);
        assert!(is_schema_violation(&def));
        def.tiers = None;
        assert!(is_schema_violation(&def));
    }

    #[test]
    fn test_non_ascending_thresholds_are_rejected() {
        let def = AchievementDef::tiered(
            "broken",
            "Trading",
            &[(100.0, "100"), (100.0, "100 again")],
        );
        assert!(is_schema_violation(&def));

        let mut def = AchievementDef::tiered("order", "Trading", &[(10.0, "a"), (20.0, "b")]);
        if let Some(tiers) = def.tiers.as_mut() {
            tiers[1].tier = 1;
        }
        assert!(is_schema_violation(&def));
    }

    #[test]
    fn test_mixed_shapes_are_rejected() {
        let mut flat = AchievementDef::flat("funded", "Milestones", 1.0);
        flat.tiers = Some(vec![]);
        assert!(is_schema_violation(&flat));

        let mut tiered = AchievementDef::tiered("t", "Trading", &[(1.0, "one")]);
        tiered.flat_required_value = Some(1.0);
        assert!(is_schema_violation(&tiered));

        let zero = AchievementDef::flat("zero", "Milestones", 0.0);
        assert!(is_schema_violation(&zero));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = r#"{
            "id": "totalTrades",
            "category": "Trading",
            "isTiered": true,
            "tiers": [{ "tier": 1, "thresholdValue": 50, "label": "50 Trades" }]
        }"#;
        let def: AchievementDef = serde_json::from_str(json).unwrap();
        assert!(def.is_tiered);
        assert_eq!(def.tier_list()[0].threshold_value, 50.0);
        assert_eq!(def.display_name(), "totalTrades");
        assert!(def.validate().is_ok());
    }
}

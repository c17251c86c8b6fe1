//! Catalog command implementation

use anyhow::Result;

use tradequest::achievements::{display, AchievementDef};
use tradequest::config::Config;

/// List achievements, grouped by category
pub fn catalog_command(config: &Config, category: Option<String>) -> Result<()> {
    let catalog = config.load_catalog()?;

    let categories: Vec<&str> = match &category {
        Some(wanted) => catalog
            .categories()
            .into_iter()
            .filter(|c| c.eq_ignore_ascii_case(wanted))
            .collect(),
        None => catalog.categories(),
    };

    if categories.is_empty() {
        println!("No achievements found.");
        return Ok(());
    }

    for name in categories {
        let achievements: Vec<&AchievementDef> = catalog.by_category(name).collect();
        println!("{} ({})", name, achievements.len());
        for achievement in achievements {
            println!("  {}", describe(achievement));
        }
        println!();
    }

    Ok(())
}

fn describe(achievement: &AchievementDef) -> String {
    let thresholds = if achievement.is_tiered {
        achievement
            .tier_list()
            .iter()
            .map(|t| display::abbreviate_number(t.threshold_value))
            .collect::<Vec<_>>()
            .join(" / ")
    } else {
        achievement
            .flat_required_value
            .map(display::abbreviate_number)
            .unwrap_or_default()
    };

    format!(
        "{} {} [{}] - {} ({})",
        achievement.icon,
        achievement.display_name(),
        achievement.id,
        achievement.description,
        thresholds
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_tiered() {
        let mut def = AchievementDef::tiered(
            "accountDollarProfit",
            "Profit",
            &[(1_000.0, "$1K"), (50_000.0, "$50K")],
        );
        def.name = "Account Profit".to_string();
        let line = describe(&def);
        assert!(line.contains("Account Profit [accountDollarProfit]"));
        assert!(line.ends_with("(1K / 50K)"));
    }
}

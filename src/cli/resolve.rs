//! Resolve command implementation

use anyhow::Result;

use tradequest::achievements::{display, resolve_value, TierResolution};
use tradequest::config::Config;

/// Show the tier state of one achievement for a given value
pub fn resolve_command(config: &Config, id: &str, value: f64) -> Result<()> {
    let catalog = config.load_catalog()?;
    let achievement = catalog.get(id)?;

    if !(value.is_finite() && value >= 0.0) {
        anyhow::bail!("Progress value must be a non-negative number, got {}", value);
    }

    let resolution = resolve_value(achievement, value);

    println!("{} {}", achievement.icon, achievement.display_name());
    println!("  {}", display::requirement_text(achievement, &resolution));

    match &resolution {
        TierResolution::Locked { .. } => println!("  Locked"),
        TierResolution::UnlockedFlat => println!("  Unlocked"),
        TierResolution::UnlockedTiered { current_tier, .. } => println!(
            "  Tier {} {}",
            current_tier,
            display::tier_stars(*current_tier, achievement.max_tiers())
        ),
    }

    if let Some(next) = display::next_tier_text(achievement, &resolution) {
        println!("  {}", next);
    }

    if let Some(progress) = resolution.progress() {
        println!(
            "  {} {}",
            display::progress_bar(progress.percent, 20),
            display::progress_line(progress)
        );
    }

    Ok(())
}

//! Validate command implementation

use anyhow::{bail, Result};
use std::path::Path;

use tradequest::BadgeCatalog;

/// Check every entry of a catalog file, reporting all problems at once
pub fn validate_command(path: &Path) -> Result<()> {
    let defs = BadgeCatalog::read_defs(path)?;
    let total = defs.len();
    let (catalog, rejected) = BadgeCatalog::new_lenient(defs);

    if rejected.is_empty() {
        println!(
            "{}: {} achievements in {} categories, all valid.",
            path.display(),
            catalog.len(),
            catalog.categories().len()
        );
        return Ok(());
    }

    for err in &rejected {
        println!("  {}", err);
    }
    bail!(
        "{}: {} of {} achievements are malformed",
        path.display(),
        rejected.len(),
        total
    );
}

use anyhow::Context;
use dwh_sim::{Generator, Preset};

use crate::repositories::{TableCount, WarehouseRepository};

/// Generate a warehouse in memory, check it, then replace the stored one.
pub async fn regenerate(
    repo: &dyn WarehouseRepository,
    preset: Preset,
    seed: Option<u64>,
) -> anyhow::Result<Vec<TableCount>> {
    let config = preset.config();
    let mut generator = match seed {
        Some(seed) => Generator::from_seed(config, seed),
        None => Generator::from_entropy(config),
    }
    .with_context(|| format!("Invalid simulation configuration for preset '{preset}'"))?;

    tracing::info!(%preset, ?seed, "Generating warehouse");
    let warehouse = generator.generate();

    let violations = warehouse.integrity_violations();
    if let Some(first) = violations.first() {
        anyhow::bail!(
            "Generated warehouse has {} dangling foreign keys, first: {:?}",
            violations.len(),
            first
        );
    }

    repo.replace_warehouse(&warehouse)
        .await
        .context("Failed to load the warehouse into the store")
}

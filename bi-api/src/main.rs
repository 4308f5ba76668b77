mod app_state;
mod cli;
mod config;
mod pipeline;
mod repositories;
mod router;
mod routes;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use clap::Parser;
use dwh_sim::{predictor, report::Kpis};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub(crate) use app_state::AppState;

use crate::{
    cli::{Cli, Commands},
    config::Settings,
    repositories::{SqliteWarehouseRepository, WarehouseRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { preset, seed } => {
            let (settings, repo) = open_store().await?;
            let preset = preset.unwrap_or(settings.simulation.preset);
            let seed = seed.or(settings.simulation.seed);
            pipeline::regenerate(&repo, preset, seed).await?;
            Ok(())
        }
        Commands::Serve { fresh } => {
            let (settings, repo) = open_store().await?;
            serve(settings, repo, fresh).await
        }
        Commands::Predict {
            effort,
            maturity,
            name,
            chart,
        } => predict(effort, maturity, name.as_deref(), chart.as_deref()).await,
        Commands::Render { out } => {
            let (_, repo) = open_store().await?;
            render(&repo, &out).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_timer(fmt::time::LocalTime::rfc_3339()),
        )
        .with(filter)
        .init();
}

async fn open_store() -> anyhow::Result<(Settings, SqliteWarehouseRepository)> {
    let settings = config::read_config().context("Failed to read configuration")?;
    let pool = SqlitePoolOptions::new()
        .connect_with(settings.database.connect_options())
        .await
        .with_context(|| {
            format!(
                "Failed to open warehouse store at {}",
                settings.database.path.display()
            )
        })?;

    Ok((settings, SqliteWarehouseRepository::new(pool)))
}

async fn serve(
    settings: Settings,
    repo: SqliteWarehouseRepository,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        pipeline::regenerate(&repo, settings.simulation.preset, settings.simulation.seed).await?;
    }

    let app_state = AppState::new(Arc::new(repo));
    let app = router::create(app_state, settings.application.app_url.clone());

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")
}

async fn render(repo: &dyn WarehouseRepository, out: &Path) -> anyhow::Result<()> {
    let quality = repo.quality_view().await?;
    let performance = repo.performance_view().await?;
    let scorecard = repo.scorecard_view().await?;
    let kpis = Kpis::summarize(&quality, &performance);

    let html = viz::dashboard_page(&kpis, &quality, &performance, &scorecard);
    tokio::fs::write(out, html)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Dashboard written to {}", out.display());

    Ok(())
}

async fn predict(
    effort: f64,
    maturity: i64,
    name: Option<&str>,
    chart: Option<&Path>,
) -> anyhow::Result<()> {
    let estimate = predictor::estimate_raw(effort, maturity)?;

    println!(
        "Estimated defects: {} (rate {} per hour, maturity level {})",
        estimate.expected_defects, estimate.defect_rate, estimate.maturity_level
    );

    if let Some(path) = chart {
        let html = viz::estimate_page(&estimate, name.unwrap_or("Unnamed project"));
        tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Rayleigh curve written to {}", path.display());
    }

    Ok(())
}

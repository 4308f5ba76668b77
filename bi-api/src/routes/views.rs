use axum::{extract::State, routing::get, Json, Router};
use dwh_sim::report::{Kpis, PerformanceRow, QualityRow, ScorecardRow};
use tracing::instrument;

use crate::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quality", get(get_quality))
        .route("/performance", get(get_performance))
        .route("/scorecard", get(get_scorecard))
        .route("/kpis", get(get_kpis))
}

#[instrument(name = "GET /views/quality", skip(app_state))]
async fn get_quality(State(app_state): State<AppState>) -> Result<Json<Vec<QualityRow>>, ApiError> {
    let rows = app_state.warehouse_repo.quality_view().await?;
    Ok(Json(rows))
}

#[instrument(name = "GET /views/performance", skip(app_state))]
async fn get_performance(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PerformanceRow>>, ApiError> {
    let rows = app_state.warehouse_repo.performance_view().await?;
    Ok(Json(rows))
}

#[instrument(name = "GET /views/scorecard", skip(app_state))]
async fn get_scorecard(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ScorecardRow>>, ApiError> {
    let rows = app_state.warehouse_repo.scorecard_view().await?;
    Ok(Json(rows))
}

#[instrument(name = "GET /views/kpis", skip(app_state))]
async fn get_kpis(State(app_state): State<AppState>) -> Result<Json<Kpis>, ApiError> {
    let repo = &app_state.warehouse_repo;
    let (quality, performance) = tokio::try_join!(repo.quality_view(), repo.performance_view())?;

    Ok(Json(Kpis::summarize(&quality, &performance)))
}

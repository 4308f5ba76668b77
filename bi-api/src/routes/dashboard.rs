use axum::{extract::State, response::Html, routing::get, Router};
use dwh_sim::report::Kpis;
use tracing::instrument;

use crate::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

#[instrument(name = "GET /dashboard", skip(app_state))]
async fn get_dashboard(State(app_state): State<AppState>) -> Result<Html<String>, ApiError> {
    let repo = &app_state.warehouse_repo;
    let (quality, performance, scorecard) = tokio::try_join!(
        repo.quality_view(),
        repo.performance_view(),
        repo.scorecard_view()
    )?;
    let kpis = Kpis::summarize(&quality, &performance);

    Ok(Html(viz::dashboard_page(
        &kpis,
        &quality,
        &performance,
        &scorecard,
    )))
}

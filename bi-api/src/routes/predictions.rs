use axum::{
    extract::Query,
    response::Html,
    routing::get,
    Json, Router,
};
use dwh_sim::predictor::{self, Estimate};
use serde::Deserialize;
use tracing::instrument;

use crate::AppState;

use super::ApiError;

const UNNAMED_PROJECT: &str = "Unnamed project";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_prediction))
        .route("/chart", get(get_prediction_chart))
}

#[derive(Debug, Deserialize)]
struct PredictionQuery {
    effort: f64,
    maturity: i64,
    name: Option<String>,
}

#[instrument(name = "GET /predictions")]
async fn get_prediction(Query(query): Query<PredictionQuery>) -> Result<Json<Estimate>, ApiError> {
    let estimate = predictor::estimate_raw(query.effort, query.maturity)?;
    tracing::debug!(
        expected_defects = estimate.expected_defects,
        "Estimated defects"
    );

    Ok(Json(estimate))
}

#[instrument(name = "GET /predictions/chart")]
async fn get_prediction_chart(
    Query(query): Query<PredictionQuery>,
) -> Result<Html<String>, ApiError> {
    let estimate = predictor::estimate_raw(query.effort, query.maturity)?;
    let name = query.name.as_deref().unwrap_or(UNNAMED_PROJECT);

    Ok(Html(viz::estimate_page(&estimate, name)))
}

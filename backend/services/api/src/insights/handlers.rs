use axum::extract::State;
use axum::Json;
use care_ai::insights::{generate_dashboard_insights, DashboardSnapshot, InsightBundle};

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;

/// Collaborator failures degrade to the fallback bundle; only a malformed
/// snapshot is rejected.
pub async fn post_dashboard_insights(
    State(state): State<AppState>,
    ApiJson(snapshot): ApiJson<DashboardSnapshot>,
) -> Result<Json<InsightBundle>, ApiError> {
    let bundle = generate_dashboard_insights(state.generative.as_ref(), &snapshot).await;
    tracing::info!(source = ?bundle.source, "dashboard insights served");
    Ok(Json(bundle))
}

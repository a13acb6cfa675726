use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use care_common::error::CareError;
use care_db::analysis::models::AnalysisFilter;
use care_scoring::ConversationAnalysis;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::{AgentId, ApiJson, ApiQuery};
use crate::AppState;

use super::requests::{AnalyzeRequest, RecordingParams};
use super::responses::AnalysisHistoryResponse;

pub async fn post_analysis(
    State(state): State<AppState>,
    AgentId(agent_id): AgentId,
    ApiJson(body): ApiJson<AnalyzeRequest>,
) -> Result<(StatusCode, Json<ConversationAnalysis>), ApiError> {
    let analysis = state
        .analyses
        .analyze(&body.transcript, &agent_id, body.lead_name.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

/// Body is the raw WAV recording; the lead name rides in the query string.
pub async fn post_recording_analysis(
    State(state): State<AppState>,
    AgentId(agent_id): AgentId,
    ApiQuery(params): ApiQuery<RecordingParams>,
    audio: Bytes,
) -> Result<(StatusCode, Json<ConversationAnalysis>), ApiError> {
    let analysis = state
        .analyses
        .analyze_recording(&audio, &agent_id, params.lead_name.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

pub async fn list_analyses(
    State(state): State<AppState>,
    AgentId(agent_id): AgentId,
    ApiQuery(filter): ApiQuery<AnalysisFilter>,
) -> Result<Json<AnalysisHistoryResponse>, ApiError> {
    let data = state.repo.list_for_agent(&agent_id, filter).await?;
    let count = data.len();
    Ok(Json(AnalysisHistoryResponse { data, count }))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    AgentId(agent_id): AgentId,
    Path(id): Path<String>,
) -> Result<Json<ConversationAnalysis>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| CareError::InvalidInput(format!("invalid analysis id: {id}")))?;
    let analysis = state
        .repo
        .get(&agent_id, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("analysis {id} not found")))?;
    Ok(Json(analysis))
}

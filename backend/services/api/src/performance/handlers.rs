use axum::extract::{Path, State};
use axum::Json;
use care_common::error::CareError;
use care_scoring::{aggregate, rank_agents, AgentPerformance};

use crate::error::ApiError;
use crate::AppState;

use super::responses::RankingsResponse;

pub async fn get_agent_performance(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<AgentPerformance>, ApiError> {
    let history = state.repo.history(&agent_id).await?;
    let performance = aggregate(&agent_id, &history)
        .ok_or_else(|| CareError::NotFound(format!("no analyses for agent {agent_id}")))?;
    Ok(Json(performance))
}

pub async fn list_rankings(
    State(state): State<AppState>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let performances = state
        .repo
        .histories()
        .await?
        .iter()
        .filter_map(|(agent_id, history)| aggregate(agent_id, history))
        .collect();

    let data = rank_agents(performances);
    let count = data.len();
    Ok(Json(RankingsResponse { data, count }))
}

use axum::extract::State;
use axum::Json;
use care_common::error::CareError;

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;

use super::requests::ChatRequest;
use super::responses::ChatResponse;

pub async fn post_chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(CareError::InvalidInput("message must not be empty".to_string()).into());
    }
    let client = state.generative.as_ref().ok_or_else(|| {
        CareError::Unavailable("generative AI is not configured".to_string())
    })?;

    let reply = match &body.data {
        Some(data) => client.analyze_data(data, message).await,
        None => client.generate(message, body.context.as_deref()).await,
    }
    .map_err(CareError::from)?;

    tracing::info!(
        model = client.model(),
        with_data = body.data.is_some(),
        reply_len = reply.len(),
        "assistant replied"
    );
    Ok(Json(ChatResponse {
        reply,
        model: client.model().to_string(),
    }))
}

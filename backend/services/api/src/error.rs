use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use care_common::error::CareError;

pub struct ApiError(pub CareError);

impl From<CareError> for ApiError {
    fn from(err: CareError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CareError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CareError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CareError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CareError::AnalysisFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "analysis could not be completed, please try again".to_string(),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

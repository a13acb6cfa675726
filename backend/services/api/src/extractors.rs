use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use care_common::error::CareError;

use crate::error::ApiError;

pub const AGENT_ID_HEADER: &str = "X-Agent-Id";

/// Identity of the requesting sales agent, taken from the `X-Agent-Id` header.
pub struct AgentId(pub String);

#[derive(Debug)]
pub struct AgentIdRejection(String);

impl IntoResponse for AgentIdRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0 });
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AgentId {
    type Rejection = AgentIdRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AGENT_ID_HEADER)
            .ok_or_else(|| AgentIdRejection(format!("missing {AGENT_ID_HEADER} header")))?;

        let value = header
            .to_str()
            .map_err(|_| AgentIdRejection(format!("invalid {AGENT_ID_HEADER} header value")))?
            .trim();

        if value.is_empty() {
            return Err(AgentIdRejection(format!("{AGENT_ID_HEADER} must not be blank")));
        }

        Ok(AgentId(value.to_string()))
    }
}

/// `Json` whose rejections use the API's `{"error": ...}` 400 contract.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CareError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `Query` with the same rejection contract as [`ApiJson`].
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CareError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}

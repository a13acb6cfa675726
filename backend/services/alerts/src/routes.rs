use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::store::{Alert, AlertStore};

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub data: Vec<Alert>,
    pub count: usize,
}

impl From<Vec<Alert>> for AlertsResponse {
    fn from(data: Vec<Alert>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

fn not_found(id: &str) -> Response {
    let body = serde_json::json!({ "error": format!("alert {id} not found") });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_alerts(State(store): State<Arc<AlertStore>>) -> Json<AlertsResponse> {
    Json(store.all().into())
}

async fn list_unresolved(State(store): State<Arc<AlertStore>>) -> Json<AlertsResponse> {
    Json(store.unresolved().into())
}

async fn resolve_alert(
    State(store): State<Arc<AlertStore>>,
    Path(id): Path<String>,
) -> Response {
    if store.resolve(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    }
}

async fn alert_audio(State(store): State<Arc<AlertStore>>, Path(id): Path<String>) -> Response {
    match store.audio(&id) {
        Some(audio) => ([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response(),
        None => not_found(&id),
    }
}

pub fn router(store: Arc<AlertStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/alerts", get(list_alerts))
        .route("/alerts/unresolved", get(list_unresolved))
        .route("/alerts/{id}/resolve", post(resolve_alert))
        .route("/alerts/{id}/audio", get(alert_audio))
        .with_state(store)
}

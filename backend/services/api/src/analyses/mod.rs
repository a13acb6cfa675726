pub mod handlers;
pub mod requests;
pub mod responses;
pub mod service;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

pub use service::AnalysisService;

/// Upload ceiling for recorded calls, matching the transcription API's own limit.
const MAX_RECORDING_BYTES: usize = 25 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/analyses",
            get(handlers::list_analyses).post(handlers::post_analysis),
        )
        .route(
            "/analyses/audio",
            post(handlers::post_recording_analysis)
                .layer(DefaultBodyLimit::max(MAX_RECORDING_BYTES)),
        )
        .route("/analyses/{id}", get(handlers::get_analysis))
}

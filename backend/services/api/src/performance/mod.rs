pub mod handlers;
pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/agents/{agent_id}/performance",
            get(handlers::get_agent_performance),
        )
        .route("/rankings", get(handlers::list_rankings))
}

pub mod handlers;

use axum::routing::post;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/insights/dashboard", post(handlers::post_dashboard_insights))
}

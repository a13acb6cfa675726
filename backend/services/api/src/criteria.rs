use axum::routing::get;
use axum::{Json, Router};
use care_scoring::criteria::{care_criteria, CareCriteria};

use crate::AppState;

async fn get_criteria() -> Json<CareCriteria> {
    Json(care_criteria())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/care/criteria", get(get_criteria))
}

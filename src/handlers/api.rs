//! GET /api: the endpoint catalog.

use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn info(State(state): State<AppState>) -> Json<crate::api_info::ApiInfo> {
    Json(state.api_info.as_ref().clone())
}

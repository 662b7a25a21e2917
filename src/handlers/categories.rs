//! Category endpoints.

use crate::error::AppError;
use crate::response::CategoriesBody;
use crate::service::CategoryService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let categories = CategoryService::list(&state.pool).await?;
    Ok((StatusCode::OK, Json(CategoriesBody { categories })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let category = CategoryService::create(&state.pool, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoriesBody {
            categories: vec![category],
        }),
    ))
}

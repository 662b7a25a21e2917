//! User endpoints.

use crate::error::AppError;
use crate::response::UsersBody;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let users = UserService::list(&state.pool).await?;
    Ok((StatusCode::OK, Json(UsersBody { users })))
}

pub async fn read(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user = UserService::by_username(&state.pool, &username).await?;
    Ok((StatusCode::OK, Json(UsersBody { users: vec![user] })))
}

//! Comment endpoints addressed by comment id.

use crate::error::AppError;
use crate::handlers::reviews::parse_id;
use crate::response::CommentsBody;
use crate::service::CommentService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn patch_votes(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let comment_id = parse_id(&id_str)?;
    let comment = CommentService::inc_votes(&state.pool, comment_id, &body).await?;
    Ok((
        StatusCode::OK,
        Json(CommentsBody {
            comments: vec![comment],
        }),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let comment_id = parse_id(&id_str)?;
    CommentService::delete(&state.pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

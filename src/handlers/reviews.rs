//! Review endpoints: listing, single review, creation, votes, deletion, and
//! the per-review comments collection.

use crate::error::AppError;
use crate::response::{CommentsBody, ReviewsBody};
use crate::service::ReviewService;
use crate::sql::ListingParams;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Raw pagination inputs for the per-review comments collection.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<String>,
    pub page: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = ReviewService::list(&state.pool, &params).await?;
    Ok((StatusCode::OK, Json(page)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review = ReviewService::create(&state.pool, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewsBody {
            reviews: vec![review],
        }),
    ))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review_id = parse_id(&id_str)?;
    let review = ReviewService::by_id(&state.pool, review_id).await?;
    Ok((
        StatusCode::OK,
        Json(ReviewsBody {
            reviews: vec![review],
        }),
    ))
}

pub async fn patch_votes(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review_id = parse_id(&id_str)?;
    let review = ReviewService::inc_votes(&state.pool, review_id, &body).await?;
    Ok((
        StatusCode::OK,
        Json(ReviewsBody {
            reviews: vec![review],
        }),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review_id = parse_id(&id_str)?;
    ReviewService::delete(&state.pool, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review_id = parse_id(&id_str)?;
    let comments = ReviewService::comments(
        &state.pool,
        review_id,
        params.limit.as_deref(),
        params.page.as_deref(),
    )
    .await?;
    Ok((StatusCode::OK, Json(CommentsBody { comments })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let review_id = parse_id(&id_str)?;
    let comment = ReviewService::add_comment(&state.pool, review_id, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentsBody {
            comments: vec![comment],
        }),
    ))
}

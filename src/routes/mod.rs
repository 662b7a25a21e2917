//! Router assembly.

mod common;
pub use common::common_routes;

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{api, categories, comments, reviews, users};
use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

/// All /api resource routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::info))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/reviews/:review_id",
            get(reviews::read)
                .patch(reviews::patch_votes)
                .delete(reviews::delete),
        )
        .route(
            "/reviews/:review_id/comments",
            get(reviews::list_comments).post(reviews::create_comment),
        )
        .route(
            "/comments/:comment_id",
            patch(comments::patch_votes).delete(comments::delete),
        )
        .route("/users", get(users::list))
        .route("/users/:username", get(users::read))
        .with_state(state)
}

/// Fallback for paths no route matches.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: ErrorDetail {
                code: "not_found".to_string(),
                message: "no such path".to_string(),
            },
        }),
    )
}

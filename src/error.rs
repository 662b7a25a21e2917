//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid sort query: '{0}'")]
    InvalidSortField(String),
    #[error("invalid order query: '{0}'")]
    InvalidOrder(String),
    #[error("invalid limit query: '{0}'")]
    InvalidLimit(String),
    #[error("invalid page query: '{0}'")]
    InvalidPage(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Status and code for a database fault, by PostgreSQL error code where one
/// is present: 22P02 (invalid text representation) is a malformed caller
/// value, 23503 (foreign key) means the referenced row does not exist,
/// 23505 (unique) is a conflict. Everything else stays opaque.
fn db_status(e: &sqlx::Error) -> (StatusCode, &'static str) {
    if let sqlx::Error::RowNotFound = e {
        return (StatusCode::NOT_FOUND, "not_found");
    }
    match e.as_database_error().and_then(|d| d.code()).as_deref() {
        Some("22P02") => (StatusCode::BAD_REQUEST, "bad_request"),
        Some("23503") => (StatusCode::NOT_FOUND, "not_found"),
        Some("23505") => (StatusCode::CONFLICT, "conflict"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidSortField(_) => (StatusCode::BAD_REQUEST, "invalid_sort_field"),
            AppError::InvalidOrder(_) => (StatusCode::BAD_REQUEST, "invalid_order"),
            AppError::InvalidLimit(_) => (StatusCode::BAD_REQUEST, "invalid_limit"),
            AppError::InvalidPage(_) => (StatusCode::BAD_REQUEST, "invalid_page"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Db(e) => db_status(e),
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_map_to_400() {
        for e in [
            AppError::InvalidSortField("rating".into()),
            AppError::InvalidOrder("sideways".into()),
            AppError::InvalidLimit("ten".into()),
            AppError::InvalidPage("two".into()),
            AppError::BadRequest("body must be a JSON object".into()),
        ] {
            assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("category 'hitandrun'".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let resp = AppError::Db(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

//! Row types for the four relations and their query-time projections.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub username: String,
    pub avatar_url: String,
    pub name: String,
}

/// Full reviews row, as returned by insert/update/delete RETURNING.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub review_id: i32,
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_img_url: String,
    pub review_body: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub votes: i32,
}

/// Listing projection: the columns the reviews collection endpoint serves,
/// plus the derived comment_count (LEFT JOIN + COUNT, 0 when no comments).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewSummary {
    pub owner: String,
    pub title: String,
    pub review_id: i32,
    pub category: String,
    pub review_img_url: String,
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub comment_count: i32,
}

/// Single-review projection: the full row plus comment_count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewDetail {
    pub review_id: i32,
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_img_url: String,
    pub review_body: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub comment_count: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub author: String,
    pub review_id: i32,
    pub votes: i32,
    pub created_at: NaiveDateTime,
    pub body: String,
}

/// Per-review comments projection; the parent review_id is implied by the path.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewComment {
    pub comment_id: i32,
    pub votes: i32,
    pub created_at: NaiveDateTime,
    pub author: String,
    pub body: String,
}

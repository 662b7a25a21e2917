//! Review reads and writes, including the filtered, sorted, paginated
//! listing that is the heart of the API.

use crate::error::AppError;
use crate::model::{Comment, Review, ReviewComment, ReviewDetail, ReviewSummary};
use crate::service::exists::{ensure_exists, Relation};
use crate::service::validation::{BodySchema, FieldType};
use crate::sql::{self, BindValue, ListingParams, Pagination, ReviewListing};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

const NEW_REVIEW: BodySchema = BodySchema::new(&[
    ("owner", FieldType::String),
    ("title", FieldType::String),
    ("review_body", FieldType::String),
    ("designer", FieldType::String),
    ("category", FieldType::String),
]);
const INC_VOTES: BodySchema = BodySchema::new(&[("inc_votes", FieldType::Int)]);
const NEW_COMMENT: BodySchema = BodySchema::new(&[
    ("username", FieldType::String),
    ("body", FieldType::String),
]);

/// One page of the reviews collection plus the uncapped matching total.
#[derive(Debug, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewSummary>,
    pub total_count: i64,
}

pub struct ReviewService;

impl ReviewService {
    /// List reviews: validate the raw parameters, run the page statement and
    /// the count statement, then disambiguate an empty page from a
    /// nonexistent filter value.
    ///
    /// The two statements are independent round trips on the pool; the total
    /// can drift from the page if rows change between them.
    pub async fn list(pool: &PgPool, raw: &ListingParams) -> Result<ReviewPage, AppError> {
        let listing = ReviewListing::from_raw(raw)?;

        let q = listing.page_query();
        tracing::debug!(sql = %q.sql, params = ?q.params, "review listing");
        let mut page = sqlx::query_as::<_, ReviewSummary>(&q.sql);
        for p in &q.params {
            page = page.bind(p.clone());
        }
        let reviews = page.fetch_all(pool).await?;

        let c = listing.count_query();
        tracing::debug!(sql = %c.sql, params = ?c.params, "review count");
        let mut count = sqlx::query_scalar::<_, i64>(&c.sql);
        for p in &c.params {
            count = count.bind(p.clone());
        }
        let total_count = count.fetch_one(pool).await?;

        // An empty page with filters present is only a legitimate result when
        // every filter value names a real entity; category is checked first.
        if reviews.is_empty() {
            if let Some(category) = &listing.category {
                ensure_exists(
                    pool,
                    Relation::Categories,
                    "slug",
                    BindValue::from(category.as_str()),
                )
                .await?;
            }
            if let Some(title) = &listing.title {
                ensure_exists(
                    pool,
                    Relation::Reviews,
                    "title",
                    BindValue::from(title.as_str()),
                )
                .await?;
            }
        }

        Ok(ReviewPage {
            reviews,
            total_count,
        })
    }

    /// Single review with its comment count.
    pub async fn by_id(pool: &PgPool, review_id: i32) -> Result<ReviewDetail, AppError> {
        let row = sqlx::query_as::<_, ReviewDetail>(
            "SELECT reviews.*, COUNT(comments.comment_id)::INT AS comment_count \
             FROM reviews LEFT JOIN comments ON reviews.review_id = comments.review_id \
             WHERE reviews.review_id = $1 GROUP BY reviews.review_id",
        )
        .bind(review_id)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))
    }

    /// Insert a review. Owner and category referencing existing rows is
    /// enforced by the foreign keys; a violation surfaces as 404.
    pub async fn create(pool: &PgPool, body: &Value) -> Result<Review, AppError> {
        NEW_REVIEW.validate(body)?;
        let row = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (owner, title, review_body, designer, category) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(body["owner"].as_str().unwrap_or_default())
        .bind(body["title"].as_str().unwrap_or_default())
        .bind(body["review_body"].as_str().unwrap_or_default())
        .bind(body["designer"].as_str().unwrap_or_default())
        .bind(body["category"].as_str().unwrap_or_default())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Apply a vote increment and return the updated row.
    pub async fn inc_votes(
        pool: &PgPool,
        review_id: i32,
        body: &Value,
    ) -> Result<Review, AppError> {
        INC_VOTES.validate(body)?;
        let inc = body["inc_votes"].as_i64().unwrap_or_default();
        let row = sqlx::query_as::<_, Review>(
            "UPDATE reviews SET votes = votes + $1 WHERE review_id = $2 RETURNING *",
        )
        .bind(inc as i32)
        .bind(review_id)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))
    }

    pub async fn delete(pool: &PgPool, review_id: i32) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("review {}", review_id)));
        }
        Ok(())
    }

    /// Comments of a review, paginated. An empty page is only legitimate
    /// when the review itself exists.
    pub async fn comments(
        pool: &PgPool,
        review_id: i32,
        limit: Option<&str>,
        page: Option<&str>,
    ) -> Result<Vec<ReviewComment>, AppError> {
        let pagination = Pagination::from_raw(limit, page)?;
        let q = sql::review_comments(review_id, pagination);
        tracing::debug!(sql = %q.sql, params = ?q.params, "review comments");
        let mut rows = sqlx::query_as::<_, ReviewComment>(&q.sql);
        for p in &q.params {
            rows = rows.bind(p.clone());
        }
        let comments = rows.fetch_all(pool).await?;
        if comments.is_empty() {
            ensure_exists(
                pool,
                Relation::Reviews,
                "review_id",
                BindValue::from(review_id as i64),
            )
            .await?;
        }
        Ok(comments)
    }

    /// Add a comment to a review. The author must be a known user; the
    /// review reference is enforced by the foreign key.
    pub async fn add_comment(
        pool: &PgPool,
        review_id: i32,
        body: &Value,
    ) -> Result<Comment, AppError> {
        NEW_COMMENT.validate(body)?;
        let username = body["username"].as_str().unwrap_or_default().to_string();
        ensure_exists(
            pool,
            Relation::Users,
            "username",
            BindValue::from(username.as_str()),
        )
        .await?;
        let row = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (author, review_id, body) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&username)
        .bind(review_id)
        .bind(body["body"].as_str().unwrap_or_default())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }
}

//! Comment mutations addressed by comment id.

use crate::error::AppError;
use crate::model::Comment;
use crate::service::validation::{BodySchema, FieldType};
use serde_json::Value;
use sqlx::PgPool;

const INC_VOTES: BodySchema = BodySchema::new(&[("inc_votes", FieldType::Int)]);

pub struct CommentService;

impl CommentService {
    /// Apply a vote increment and return the updated row.
    pub async fn inc_votes(
        pool: &PgPool,
        comment_id: i32,
        body: &Value,
    ) -> Result<Comment, AppError> {
        INC_VOTES.validate(body)?;
        let inc = body["inc_votes"].as_i64().unwrap_or_default();
        let row = sqlx::query_as::<_, Comment>(
            "UPDATE comments SET votes = votes + $1 WHERE comment_id = $2 RETURNING *",
        )
        .bind(inc as i32)
        .bind(comment_id)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("comment {}", comment_id)))
    }

    pub async fn delete(pool: &PgPool, comment_id: i32) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("comment {}", comment_id)));
        }
        Ok(())
    }
}

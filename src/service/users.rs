//! User lookups.

use crate::error::AppError;
use crate::model::User;
use sqlx::PgPool;

pub struct UserService;

impl UserService {
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, User>("SELECT username, avatar_url, name FROM users")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn by_username(pool: &PgPool, username: &str) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT username, avatar_url, name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))
    }
}

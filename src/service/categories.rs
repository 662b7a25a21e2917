//! Category reads and creation.

use crate::error::AppError;
use crate::model::Category;
use crate::service::validation::{BodySchema, FieldType};
use serde_json::Value;
use sqlx::PgPool;

const NEW_CATEGORY: BodySchema = BodySchema::new(&[
    ("slug", FieldType::String),
    ("description", FieldType::String),
]);

pub struct CategoryService;

impl CategoryService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>("SELECT slug, description FROM categories")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(pool: &PgPool, body: &Value) -> Result<Category, AppError> {
        NEW_CATEGORY.validate(body)?;
        let slug = body["slug"].as_str().unwrap_or_default().to_string();
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (slug, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&slug)
        .bind(body["description"].as_str().unwrap_or_default())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .and_then(|d| d.code())
                .is_some_and(|c| c == "23505");
            if duplicate {
                AppError::Conflict(format!("category '{}' already exists", slug))
            } else {
                AppError::Db(e)
            }
        })?;
        Ok(row)
    }
}

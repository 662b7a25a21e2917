//! Table DDL and seeding for the four relations.

use crate::error::AppError;
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::PgPool;

/// Image applied to reviews inserted without one.
pub const PLACEHOLDER_REVIEW_IMG_URL: &str =
    "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg";

fn create_table_statements() -> [String; 4] {
    [
        "CREATE TABLE IF NOT EXISTS categories (
            slug VARCHAR(50) PRIMARY KEY,
            description TEXT NOT NULL
        )"
        .to_string(),
        "CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(50) PRIMARY KEY,
            avatar_url TEXT NOT NULL,
            name VARCHAR(50) NOT NULL
        )"
        .to_string(),
        format!(
            "CREATE TABLE IF NOT EXISTS reviews (
                review_id SERIAL PRIMARY KEY,
                title VARCHAR(250) NOT NULL,
                designer VARCHAR(250) NOT NULL,
                owner VARCHAR(200) REFERENCES users(username),
                review_img_url VARCHAR(5000) NOT NULL DEFAULT '{}',
                review_body VARCHAR(5000) NOT NULL,
                category VARCHAR(200) REFERENCES categories(slug),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                votes INT NOT NULL DEFAULT 0
            )",
            PLACEHOLDER_REVIEW_IMG_URL
        ),
        "CREATE TABLE IF NOT EXISTS comments (
            comment_id SERIAL PRIMARY KEY,
            author VARCHAR(50) REFERENCES users(username) NOT NULL,
            review_id INT REFERENCES reviews(review_id) NOT NULL,
            votes INT NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            body TEXT NOT NULL
        )"
        .to_string(),
    ]
}

/// Create the four tables if they do not exist, referenced tables first.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in create_table_statements() {
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub username: String,
    pub avatar_url: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSeed {
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_body: String,
    #[serde(default)]
    pub review_img_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub votes: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSeed {
    pub author: String,
    pub review_id: i32,
    #[serde(default)]
    pub votes: i32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    pub categories: Vec<CategorySeed>,
    pub users: Vec<UserSeed>,
    pub reviews: Vec<ReviewSeed>,
    pub comments: Vec<CommentSeed>,
}

/// Drop and recreate the tables, then insert the seed rows inside one
/// transaction, referenced tables first. Review ids are assigned by the
/// serial column in insertion order, starting at 1.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for table in ["comments", "reviews", "users", "categories"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(&mut *tx)
            .await?;
    }
    for ddl in create_table_statements() {
        sqlx::query(&ddl).execute(&mut *tx).await?;
    }

    for c in &data.categories {
        sqlx::query("INSERT INTO categories (slug, description) VALUES ($1, $2)")
            .bind(&c.slug)
            .bind(&c.description)
            .execute(&mut *tx)
            .await?;
    }
    for u in &data.users {
        sqlx::query("INSERT INTO users (username, avatar_url, name) VALUES ($1, $2, $3)")
            .bind(&u.username)
            .bind(&u.avatar_url)
            .bind(&u.name)
            .execute(&mut *tx)
            .await?;
    }
    for r in &data.reviews {
        sqlx::query(
            "INSERT INTO reviews \
             (title, designer, owner, review_img_url, review_body, category, created_at, votes) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, LOCALTIMESTAMP), $8)",
        )
        .bind(&r.title)
        .bind(&r.designer)
        .bind(&r.owner)
        .bind(
            r.review_img_url
                .as_deref()
                .unwrap_or(PLACEHOLDER_REVIEW_IMG_URL),
        )
        .bind(&r.review_body)
        .bind(&r.category)
        .bind(r.created_at)
        .bind(r.votes)
        .execute(&mut *tx)
        .await?;
    }
    for c in &data.comments {
        sqlx::query(
            "INSERT INTO comments (author, review_id, votes, created_at, body) \
             VALUES ($1, $2, $3, COALESCE($4, LOCALTIMESTAMP), $5)",
        )
        .bind(&c.author)
        .bind(c.review_id)
        .bind(c.votes)
        .bind(c.created_at)
        .bind(&c.body)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    tracing::info!(
        categories = data.categories.len(),
        users = data.users.len(),
        reviews = data.reviews.len(),
        comments = data.comments.len(),
        "seeded"
    );
    Ok(())
}

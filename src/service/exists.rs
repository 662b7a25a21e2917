//! Generic existence check: one equality-filtered read, `NotFound` on zero rows.

use crate::error::AppError;
use crate::sql::{quoted, BindValue};
use sqlx::PgPool;

/// The relations an existence check may target.
#[derive(Debug, Clone, Copy)]
pub enum Relation {
    Categories,
    Users,
    Reviews,
    Comments,
}

impl Relation {
    pub fn table(self) -> &'static str {
        match self {
            Relation::Categories => "categories",
            Relation::Users => "users",
            Relation::Reviews => "reviews",
            Relation::Comments => "comments",
        }
    }
}

fn exists_query(relation: Relation, column: &str) -> String {
    format!(
        "SELECT 1 FROM {} WHERE {} = $1 LIMIT 1",
        relation.table(),
        quoted(column)
    )
}

/// Succeeds when at least one row of `relation` has `column` equal to
/// `value`; fails with `NotFound` otherwise. No side effects. The table name
/// comes from the enum, the column identifier is quote-escaped, and the
/// value is always a bound parameter.
pub async fn ensure_exists(
    pool: &PgPool,
    relation: Relation,
    column: &str,
    value: BindValue,
) -> Result<(), AppError> {
    let sql = exists_query(relation, column);
    tracing::debug!(sql = %sql, value = %value, "existence check");
    let row: Option<(i32,)> = sqlx::query_as(&sql)
        .bind(value.clone())
        .fetch_optional(pool)
        .await?;
    match row {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!(
            "no {} row with {} = {}",
            relation.table(),
            column,
            value
        ))),
    }
}

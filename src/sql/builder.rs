//! Builds the parameterized review listing statements: validated sort and
//! pagination, optional equality filters as bound parameters, and a matching
//! uncapped count statement.

use crate::error::AppError;
use crate::sql::params::BindValue;
use serde::Deserialize;

/// Quote identifier for PostgreSQL (safe: only from fixed whitelists).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Raw query-string inputs for the reviews collection, exactly as received.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListingParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// The sortable columns of the listing. Only these names ever reach the
/// ORDER BY clause; everything else fails validation up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Owner,
    Title,
    ReviewId,
    Category,
    ReviewImgUrl,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Owner,
        SortField::Title,
        SortField::ReviewId,
        SortField::Category,
        SortField::ReviewImgUrl,
        SortField::CreatedAt,
        SortField::Votes,
        SortField::CommentCount,
    ];

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "owner" => SortField::Owner,
            "title" => SortField::Title,
            "review_id" => SortField::ReviewId,
            "category" => SortField::Category,
            "review_img_url" => SortField::ReviewImgUrl,
            "created_at" => SortField::CreatedAt,
            "votes" => SortField::Votes,
            "comment_count" => SortField::CommentCount,
            _ => return None,
        })
    }

    /// ORDER BY expression: table-qualified column, except the derived
    /// comment_count which only exists as a select alias.
    fn as_sql(self) -> &'static str {
        match self {
            SortField::Owner => "reviews.owner",
            SortField::Title => "reviews.title",
            SortField::ReviewId => "reviews.review_id",
            SortField::Category => "reviews.category",
            SortField::ReviewImgUrl => "reviews.review_img_url",
            SortField::CreatedAt => "reviews.created_at",
            SortField::Votes => "reviews.votes",
            SortField::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Offset pagination. Inputs arrive as strings; anything that does not parse
/// as a positive integer is rejected before SQL composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

pub const DEFAULT_LIMIT: i64 = 10;

impl Pagination {
    pub fn from_raw(limit: Option<&str>, page: Option<&str>) -> Result<Self, AppError> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(s) => s
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::InvalidLimit(s.to_string()))?,
        };
        let page = match page {
            None => 1,
            Some(s) => s
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::InvalidPage(s.to_string()))?,
        };
        Ok(Pagination { limit, page })
    }

    pub fn offset(self) -> i64 {
        self.limit * (self.page - 1)
    }
}

/// The columns the listing serves, plus the derived comment count.
const LISTING_COLUMNS: &str = "reviews.owner, reviews.title, reviews.review_id, \
     reviews.category, reviews.review_img_url, reviews.created_at, reviews.votes, \
     COUNT(comments.comment_id)::INT AS comment_count";

/// A validated review listing request. Construct with [`ReviewListing::from_raw`];
/// the sort field and order are enum-backed, so only whitelisted identifiers
/// are interpolated into statement text. Filter values are always bound.
#[derive(Debug)]
pub struct ReviewListing {
    sort_by: SortField,
    order: SortOrder,
    pub category: Option<String>,
    pub title: Option<String>,
    pub pagination: Pagination,
}

impl ReviewListing {
    /// Validate raw parameters. Fails fast: no SQL is composed and no query
    /// executed on invalid input. Defaults: created_at, desc, limit 10, page 1.
    pub fn from_raw(raw: &ListingParams) -> Result<Self, AppError> {
        let sort_by = match raw.sort_by.as_deref() {
            None => SortField::CreatedAt,
            Some(s) => {
                SortField::parse(s).ok_or_else(|| AppError::InvalidSortField(s.to_string()))?
            }
        };
        let order = match raw.order.as_deref() {
            None => SortOrder::Desc,
            Some(s) => SortOrder::parse(s).ok_or_else(|| AppError::InvalidOrder(s.to_string()))?,
        };
        let pagination = Pagination::from_raw(raw.limit.as_deref(), raw.page.as_deref())?;
        Ok(ReviewListing {
            sort_by,
            order,
            category: raw.category.clone(),
            title: raw.title.clone(),
            pagination,
        })
    }

    /// Shared filtered, grouped SELECT body; appends one bound parameter per
    /// supplied filter, conjoined with AND.
    fn filtered_group(&self, q: &mut QueryBuf, columns: &str) -> String {
        let mut sql = format!(
            "SELECT {} FROM reviews LEFT JOIN comments ON reviews.review_id = comments.review_id",
            columns
        );
        let mut where_parts = Vec::new();
        if let Some(category) = &self.category {
            let n = q.push_param(BindValue::from(category.as_str()));
            where_parts.push(format!("reviews.category = ${}", n));
        }
        if let Some(title) = &self.title {
            let n = q.push_param(BindValue::from(title.as_str()));
            where_parts.push(format!("reviews.title = ${}", n));
        }
        if !where_parts.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));
        }
        sql.push_str(" GROUP BY reviews.review_id");
        sql
    }

    /// The listing statement: filtered, grouped, ordered by the validated
    /// sort field with review_id ASC as deterministic tie-break, then
    /// limited and offset per pagination.
    pub fn page_query(&self) -> QueryBuf {
        let mut q = QueryBuf::new();
        let mut sql = self.filtered_group(&mut q, LISTING_COLUMNS);
        sql.push_str(&format!(
            " ORDER BY {} {}",
            self.sort_by.as_sql(),
            self.order.as_sql()
        ));
        if self.sort_by != SortField::ReviewId {
            sql.push_str(", reviews.review_id ASC");
        }
        sql.push_str(&format!(
            " LIMIT {} OFFSET {}",
            self.pagination.limit,
            self.pagination.offset()
        ));
        q.sql = sql;
        q
    }

    /// The count statement: identical filters and grouping, no order, limit,
    /// or offset, so the total is not capped by pagination.
    pub fn count_query(&self) -> QueryBuf {
        let mut q = QueryBuf::new();
        let inner = self.filtered_group(&mut q, "reviews.review_id");
        q.sql = format!("SELECT COUNT(*) FROM ({}) AS matched", inner);
        q
    }
}

/// Comments of one review, oldest first, paginated with the same rules as
/// the review listing.
pub fn review_comments(review_id: i32, pagination: Pagination) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::from(review_id as i64));
    q.sql = format!(
        "SELECT comment_id, votes, created_at, author, body FROM comments \
         WHERE review_id = ${} ORDER BY comment_id ASC LIMIT {} OFFSET {}",
        n,
        pagination.limit,
        pagination.offset()
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> ListingParams {
        let mut p = ListingParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "sort_by" => p.sort_by = v,
                "order" => p.order = v,
                "category" => p.category = v,
                "title" => p.title = v,
                "limit" => p.limit = v,
                "page" => p.page = v,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    #[test]
    fn defaults_are_created_at_desc_limit_10_page_1() {
        let listing = ReviewListing::from_raw(&ListingParams::default()).unwrap();
        let q = listing.page_query();
        assert!(q.sql.contains("ORDER BY reviews.created_at DESC, reviews.review_id ASC"));
        assert!(q.sql.ends_with("LIMIT 10 OFFSET 0"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn every_whitelisted_field_and_order_composes() {
        let names = [
            "owner",
            "title",
            "review_id",
            "category",
            "review_img_url",
            "created_at",
            "votes",
            "comment_count",
        ];
        for name in names {
            for order in ["asc", "desc"] {
                let listing =
                    ReviewListing::from_raw(&raw(&[("sort_by", name), ("order", order)])).unwrap();
                let q = listing.page_query();
                assert!(q.sql.contains("ORDER BY"), "no order clause for {}", name);
                assert!(q.sql.contains(order.to_uppercase().as_str()));
            }
        }
        assert_eq!(names.len(), SortField::ALL.len());
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = ReviewListing::from_raw(&raw(&[("sort_by", "votes; DROP TABLE reviews")]))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSortField(_)));
    }

    #[test]
    fn order_is_case_sensitive() {
        for bad in ["ASC", "DESC", "ascending", ""] {
            let err = ReviewListing::from_raw(&raw(&[("order", bad)])).unwrap_err();
            assert!(matches!(err, AppError::InvalidOrder(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn non_numeric_limit_and_page_are_rejected() {
        let err = ReviewListing::from_raw(&raw(&[("limit", "ten")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidLimit(_)));
        let err = ReviewListing::from_raw(&raw(&[("page", "2.5")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidPage(_)));
    }

    #[test]
    fn zero_and_negative_pagination_are_rejected() {
        let err = ReviewListing::from_raw(&raw(&[("limit", "0")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidLimit(_)));
        let err = ReviewListing::from_raw(&raw(&[("page", "-1")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidPage(_)));
    }

    #[test]
    fn offset_is_limit_times_page_minus_one() {
        let listing =
            ReviewListing::from_raw(&raw(&[("limit", "5"), ("page", "2")])).unwrap();
        let q = listing.page_query();
        assert!(q.sql.ends_with("LIMIT 5 OFFSET 5"));
    }

    #[test]
    fn review_id_sort_gets_no_extra_tie_break() {
        let listing =
            ReviewListing::from_raw(&raw(&[("sort_by", "review_id"), ("order", "asc")])).unwrap();
        let q = listing.page_query();
        assert!(q.sql.contains("ORDER BY reviews.review_id ASC LIMIT"));
    }

    #[test]
    fn category_filter_binds_one_param() {
        let listing = ReviewListing::from_raw(&raw(&[("category", "dexterity")])).unwrap();
        let q = listing.page_query();
        assert!(q.sql.contains("WHERE reviews.category = $1"));
        assert_eq!(q.params, vec![BindValue::Text("dexterity".into())]);
    }

    #[test]
    fn category_and_title_filters_are_conjoined() {
        let listing = ReviewListing::from_raw(&raw(&[
            ("category", "dexterity"),
            ("title", "Jenga"),
        ]))
        .unwrap();
        let q = listing.page_query();
        assert!(q
            .sql
            .contains("WHERE reviews.category = $1 AND reviews.title = $2"));
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("dexterity".into()),
                BindValue::Text("Jenga".into())
            ]
        );
    }

    #[test]
    fn filter_values_are_never_interpolated() {
        let listing =
            ReviewListing::from_raw(&raw(&[("category", "x' OR '1'='1")])).unwrap();
        let q = listing.page_query();
        assert!(!q.sql.contains("OR '1'='1"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn count_query_has_same_predicates_and_no_pagination() {
        let listing = ReviewListing::from_raw(&raw(&[
            ("category", "dexterity"),
            ("title", "Jenga"),
            ("limit", "5"),
            ("page", "3"),
        ]))
        .unwrap();
        let count = listing.count_query();
        assert!(count.sql.starts_with("SELECT COUNT(*) FROM (SELECT"));
        assert!(count
            .sql
            .contains("WHERE reviews.category = $1 AND reviews.title = $2"));
        assert!(count.sql.contains("GROUP BY reviews.review_id"));
        assert!(!count.sql.contains("ORDER BY"));
        assert!(!count.sql.contains("LIMIT"));
        assert!(!count.sql.contains("OFFSET"));
        assert_eq!(count.params, listing.page_query().params);
    }

    #[test]
    fn review_comments_is_paginated_and_bound() {
        let q = review_comments(3, Pagination { limit: 5, page: 2 });
        assert!(q.sql.contains("WHERE review_id = $1"));
        assert!(q.sql.ends_with("LIMIT 5 OFFSET 5"));
        assert_eq!(q.params, vec![BindValue::Int(3)]);
    }

    #[test]
    fn quoted_doubles_embedded_quotes() {
        assert_eq!(quoted("title"), "\"title\"");
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}

//! The endpoint catalog served at GET /api. Built once at startup and shared
//! by reference; nothing mutates it after construction.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_body: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub endpoints: BTreeMap<&'static str, EndpointInfo>,
}

fn entry(description: &'static str) -> EndpointInfo {
    EndpointInfo {
        description,
        queries: None,
        example_body: None,
    }
}

impl ApiInfo {
    pub fn new() -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            "GET /api",
            entry("serves a json representation of all the available endpoints of the api"),
        );
        endpoints.insert(
            "GET /api/reviews",
            EndpointInfo {
                queries: Some(&["category", "sort_by", "order", "title", "page", "limit"]),
                ..entry("serves an array of all reviews with their comment counts and the total matching count")
            },
        );
        endpoints.insert(
            "POST /api/reviews",
            EndpointInfo {
                example_body: Some(json!({
                    "owner": "bainesface",
                    "title": "new game",
                    "review_body": "review body",
                    "designer": "Mario",
                    "category": "strategy"
                })),
                ..entry("serves an array with the new review")
            },
        );
        endpoints.insert(
            "GET /api/reviews/:review_id",
            entry("serves an array with the specified review"),
        );
        endpoints.insert(
            "PATCH /api/reviews/:review_id",
            EndpointInfo {
                example_body: Some(json!({ "inc_votes": 13 })),
                ..entry("serves an array with the review updated by the specified number of votes")
            },
        );
        endpoints.insert(
            "DELETE /api/reviews/:review_id",
            entry("deletes specified review"),
        );
        endpoints.insert(
            "GET /api/reviews/:review_id/comments",
            EndpointInfo {
                queries: Some(&["page", "limit"]),
                ..entry("serves an array with comments of the specified review")
            },
        );
        endpoints.insert(
            "POST /api/reviews/:review_id/comments",
            EndpointInfo {
                example_body: Some(json!({ "username": "bainesface", "body": "new comment" })),
                ..entry("serves an array with the new comment")
            },
        );
        endpoints.insert(
            "PATCH /api/comments/:comment_id",
            EndpointInfo {
                example_body: Some(json!({ "inc_votes": 13 })),
                ..entry("serves an array with the comment updated by the specified number of votes")
            },
        );
        endpoints.insert(
            "DELETE /api/comments/:comment_id",
            entry("deletes specified comment"),
        );
        endpoints.insert("GET /api/categories", entry("serves an array of all categories"));
        endpoints.insert(
            "POST /api/categories",
            EndpointInfo {
                example_body: Some(json!({ "slug": "luck", "description": "Games without strategy" })),
                ..entry("serves an array with the new category")
            },
        );
        endpoints.insert("GET /api/users", entry("serves an array of all users"));
        endpoints.insert(
            "GET /api/users/:username",
            entry("serves an array with the specified user"),
        );
        ApiInfo { endpoints }
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        ApiInfo::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_the_review_listing() {
        let info = ApiInfo::new();
        let listing = info.endpoints.get("GET /api/reviews").unwrap();
        let queries = listing.queries.unwrap();
        for q in ["category", "sort_by", "order", "title", "page", "limit"] {
            assert!(queries.contains(&q), "missing query {}", q);
        }
    }

    #[test]
    fn catalog_serializes() {
        let v = serde_json::to_value(ApiInfo::new()).unwrap();
        assert!(v["endpoints"]["GET /api/users"]["description"].is_string());
    }
}

//! Listing scenarios against a live PostgreSQL. These reseed the database,
//! so they are ignored by default; run them serially with:
//!
//!     DATABASE_URL=postgres://localhost/tabletop_test \
//!         cargo test -- --ignored --test-threads=1

use sqlx::PgPool;
use tabletop_api::store::{CategorySeed, CommentSeed, ReviewSeed, SeedData, UserSeed};
use tabletop_api::{seed, AppError, ListingParams, ReviewService};

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database")
}

fn user(username: &str) -> UserSeed {
    UserSeed {
        username: username.to_string(),
        avatar_url: format!("https://avatars.test/{}.png", username),
        name: username.to_string(),
    }
}

fn review(title: &str, owner: &str, category: &str) -> ReviewSeed {
    ReviewSeed {
        title: title.to_string(),
        designer: "Leslie Scott".to_string(),
        owner: owner.to_string(),
        review_body: format!("thoughts on {}", title),
        review_img_url: None,
        category: category.to_string(),
        created_at: None,
        votes: 0,
    }
}

/// 13 reviews: one in dexterity, twelve in strategy, plus a category with no
/// reviews at all. Serial review ids run 1..=13 in insertion order.
fn test_data() -> SeedData {
    let mut reviews = vec![review("Jenga", "mallionaire", "dexterity")];
    for i in 2..=13 {
        reviews.push(review(&format!("Strategy game {}", i), "bainesface", "strategy"));
    }
    SeedData {
        categories: vec![
            CategorySeed {
                slug: "dexterity".to_string(),
                description: "Games involving physical skill".to_string(),
            },
            CategorySeed {
                slug: "strategy".to_string(),
                description: "Games with careful planning".to_string(),
            },
            CategorySeed {
                slug: "deck-building".to_string(),
                description: "No seeded reviews".to_string(),
            },
        ],
        users: vec![user("mallionaire"), user("bainesface")],
        reviews,
        comments: vec![CommentSeed {
            author: "bainesface".to_string(),
            review_id: 1,
            votes: 16,
            created_at: None,
            body: "I loved this game too!".to_string(),
        }],
    }
}

fn params(pairs: &[(&str, &str)]) -> ListingParams {
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

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn second_page_of_five_by_review_id() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let page = ReviewService::list(
        &pool,
        &params(&[
            ("sort_by", "review_id"),
            ("order", "asc"),
            ("page", "2"),
            ("limit", "5"),
        ]),
    )
    .await
    .unwrap();
    let ids: Vec<i32> = page.reviews.iter().map(|r| r.review_id).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    assert_eq!(page.total_count, 13);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn category_filter_matches_one_review() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let page = ReviewService::list(&pool, &params(&[("category", "dexterity")]))
        .await
        .unwrap();
    assert_eq!(page.reviews.len(), 1);
    assert_eq!(page.total_count, 1);
    assert!(page.reviews.iter().all(|r| r.category == "dexterity"));
    assert_eq!(page.reviews[0].comment_count, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn nonexistent_category_is_not_found() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let err = ReviewService::list(&pool, &params(&[("category", "hitandrun")]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn existing_category_with_no_reviews_is_an_empty_page() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let page = ReviewService::list(&pool, &params(&[("category", "deck-building")]))
        .await
        .unwrap();
    assert!(page.reviews.is_empty());
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn listing_is_idempotent_without_writes() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let p = params(&[("sort_by", "votes"), ("order", "desc")]);
    let first = ReviewService::list(&pool, &p).await.unwrap();
    let second = ReviewService::list(&pool, &p).await.unwrap();
    assert_eq!(first.total_count, second.total_count);
    assert_eq!(
        first.reviews.iter().map(|r| r.review_id).collect::<Vec<_>>(),
        second.reviews.iter().map(|r| r.review_id).collect::<Vec<_>>()
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn comments_of_a_missing_review_are_not_found() {
    let pool = pool().await;
    seed(&pool, &test_data()).await.unwrap();
    let err = ReviewService::comments(&pool, 99, None, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // An existing review with no comments is a legitimate empty list.
    let comments = ReviewService::comments(&pool, 2, None, None).await.unwrap();
    assert!(comments.is_empty());
}

//! Board game review REST API: categories, reviews, comments, and users over
//! PostgreSQL, with filtering, sorting, and pagination on the reviews
//! collection.

pub mod api_info;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use api_info::ApiInfo;
pub use error::AppError;
pub use routes::{api_routes, common_routes, not_found};
pub use service::{
    ensure_exists, CategoryService, CommentService, Relation, ReviewPage, ReviewService,
    UserService,
};
pub use sql::{ListingParams, Pagination, ReviewListing};
pub use state::AppState;
pub use store::{ensure_schema, seed, SeedData};

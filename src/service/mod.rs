//! Services over the pool: listing orchestration, existence checks, body validation.

mod categories;
mod comments;
mod exists;
mod reviews;
mod users;
mod validation;

pub use categories::CategoryService;
pub use comments::CommentService;
pub use exists::{ensure_exists, Relation};
pub use reviews::{ReviewPage, ReviewService};
pub use users::UserService;
pub use validation::{BodySchema, FieldType};

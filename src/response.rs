//! Success envelopes. Payloads are keyed by resource, and single-row
//! endpoints serve one-element arrays, as this API has always done.

use serde::Serialize;

use crate::model::{Category, User};

#[derive(Serialize)]
pub struct ReviewsBody<T: Serialize> {
    pub reviews: Vec<T>,
}

#[derive(Serialize)]
pub struct CommentsBody<T: Serialize> {
    pub comments: Vec<T>,
}

#[derive(Serialize)]
pub struct CategoriesBody {
    pub categories: Vec<Category>,
}

#[derive(Serialize)]
pub struct UsersBody {
    pub users: Vec<User>,
}

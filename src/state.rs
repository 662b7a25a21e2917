//! Shared application state for all routes.

use crate::api_info::ApiInfo;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Endpoint catalog: constructed once at startup, immutable thereafter.
    pub api_info: Arc<ApiInfo>,
}

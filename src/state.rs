// src/state.rs

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    /// Rows per page for the server-rendered listings.
    pub page_size: i64,
}

//! REST request handlers.

pub mod admin;
pub mod liquidity;
pub mod pool;
pub mod swap;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Versioned API routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pool::routes())
        .merge(swap::routes())
        .merge(liquidity::routes())
        .merge(admin::routes())
}

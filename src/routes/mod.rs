pub mod health;
pub mod swaps;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", swap_router())
}

fn swap_router() -> Router<Arc<AppState>> {
    Router::new().route("/swaps/:id/cancel", post(swaps::cancel_swap))
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Operations
        .route("/api/v1/operations", get(handlers::list_operations))
        .route("/api/v1/process", post(handlers::handle_process))

        .with_state(state)
}

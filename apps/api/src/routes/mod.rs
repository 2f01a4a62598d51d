pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_options))
        .route("/api/v1/analysis", get(handlers::handle_get_analysis))
        .route(
            "/api/v1/analysis/regenerate",
            post(handlers::handle_regenerate),
        )
        .route("/api/v1/analysis/extract", post(handlers::handle_extract))
        .with_state(state)
}

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Positions API
        .merge(crate::api::routes::position_routes::position_routes())
        // JSON bodies for unknown paths and wrong methods
        .fallback(handler_404)
        .method_not_allowed_fallback(handler_405)
        .layer(CorsLayer::very_permissive())
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

// Handler for 404 Not Found
async fn handler_404() -> AppError {
    AppError::NotFound
}

// Handler for 405 Method Not Allowed
async fn handler_405() -> AppError {
    AppError::MethodNotAllowed
}

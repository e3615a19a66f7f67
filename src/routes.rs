use axum::{response::IntoResponse, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    // Recipe subrouter lives under /api/v1
    let api_v1 =
        Router::new().nest("/recipes", crate::api::routes::recipe_routes::recipe_routes());

    Router::new()
        // Root route
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API v1
        .nest("/api/v1", api_v1)

        // Fallback handler for 404
        .fallback(handler_404)
        // ✅ Apply CORS layer to all routes
        .layer(CorsLayer::very_permissive())
}

// Handler for root
async fn root() -> &'static str {
    "Server is running!"
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

// Unmatched routes still answer in the envelope shape
async fn handler_404() -> impl IntoResponse {
    AppError::NotFound("the requested resource was not found".to_string())
}

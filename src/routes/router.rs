/**
 * Router Configuration
 *
 * This module combines the route table, the global middleware stack and
 * the application state into the final Axum router.
 *
 * # Layering
 *
 * Layers apply outside-in: request tracing wraps the authentication gate,
 * which wraps the routes. The gate sees every request and passes the
 * allow-listed public routes through untouched; everything else needs a
 * valid access token before a handler runs.
 */

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_guard;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes and middleware configured
pub fn create_router(state: AppState) -> Router {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, &state);

    router
        .fallback(not_found)
        .layer(from_fn_with_state(state.tokens.clone(), auth_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Fallback for unknown routes
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": "Route not found" },
        })),
    )
}

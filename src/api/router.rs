use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::keys;
use super::projects;
use super::state::AppState;
use super::user;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Account and session endpoints (signup/login are public)
        .nest("/api/user", user::create_user_router())
        // Owner-scoped resources behind the session cookie
        .nest("/api/keys", keys::create_keys_router())
        .nest("/api/projects", projects::create_projects_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser dashboard calls this API cross-origin
        .layer(CorsLayer::permissive())
}

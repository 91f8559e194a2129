//! HTTP server setup and routing

use crate::membership::MembershipService;
use crate::scheduling::SessionService;
use crate::store::Store;
use axum::{
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application context passed to all handlers
///
/// Cloning is cheap: the services share one pool handle.
#[derive(Clone)]
pub struct AppContext {
    pub sessions: SessionService,
    pub memberships: MembershipService,
}

impl AppContext {
    pub fn new(store: Store) -> Self {
        Self {
            sessions: SessionService::new(store.clone()),
            memberships: MembershipService::new(store),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// GET /health - Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "bookwell-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))

        // Session scheduling
        .route("/sessions", post(super::sessions::create_session))
        .route("/sessions", get(super::sessions::list_sessions))
        .route("/sessions/bulk", post(super::sessions::bulk_create_sessions))
        .route("/sessions/bulk", delete(super::sessions::bulk_delete_sessions))
        .route("/sessions/check-conflicts", post(super::sessions::check_conflicts))
        .route("/sessions/availability", post(super::sessions::day_availability))
        .route("/sessions/:session_id", get(super::sessions::get_session))
        .route("/sessions/:session_id", patch(super::sessions::update_session))
        .route("/sessions/:session_id", delete(super::sessions::delete_session))

        // Memberships and community-plan associations
        .route("/memberships", post(super::memberships::create_membership))
        .route("/memberships/bulk", post(super::memberships::bulk_create_memberships))
        .route("/memberships/:membership_id", get(super::memberships::get_membership))
        .route("/memberships/:membership_id", delete(super::memberships::delete_membership))
        .route("/community-plans", post(super::memberships::create_community_plan))

        // Attach application context
        .with_state(ctx)

        // Request tracing and CORS for local access
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

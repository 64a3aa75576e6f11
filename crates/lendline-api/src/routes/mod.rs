//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{conversations, health, inbound};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(inbound_routes())
        .merge(conversation_routes())
}

/// Inbound email routes
fn inbound_routes() -> Router<AppState> {
    Router::new().route("/email/inbound", post(inbound::receive_inbound_email))
}

/// Conversation routes
fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations/reply", post(conversations::submit_reply))
        .route(
            "/conversations/:conversation_id/messages",
            get(conversations::get_messages),
        )
}

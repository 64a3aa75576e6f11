//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use lendline_common::{AppConfig, AppError};
use lendline_core::ReplyAddressCodec;
use lendline_db::{
    create_pool, PgConversationRepository, PgFinancingRequestRepository, PgLenderRepository,
    PgMessageRepository, PgUserRepository,
};
use lendline_mail::PostmarkClient;
use lendline_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware_with_config(
        create_router(),
        &state.config().rate_limit,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    // Health endpoints sit outside the rate limiter
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = lendline_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create mail provider client
    let mailer = Arc::new(PostmarkClient::new(&config.mail)?);

    // Create reply address codec for the inbound domain
    let reply_codec = Arc::new(ReplyAddressCodec::new(config.mail.inbound_domain.clone()));

    // Create repositories
    let conversation_repo = Arc::new(PgConversationRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let lender_repo = Arc::new(PgLenderRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let financing_request_repo = Arc::new(PgFinancingRequestRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .conversation_repo(conversation_repo)
        .message_repo(message_repo)
        .lender_repo(lender_repo)
        .user_repo(user_repo)
        .financing_request_repo(financing_request_repo)
        .notification_gateway(mailer)
        .reply_codec(reply_codec)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}

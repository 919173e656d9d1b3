//! # Coachbook API
//!
//! The API crate provides the web server for the coaching website: the public
//! booking flow, the contact form and the admin dashboard endpoints.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Authentication and error mapping
//! - **Config**: Environment and application configuration
//! - **Notify / Relay**: Outbound client notifications and contact forwarding
//!
//! Handlers only talk to storage through the [`coachbook_db::Store`] trait, so
//! the router can be exercised in tests with a mock store.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Client notifications for booking events
pub mod notify;
/// Contact form forwarding
pub mod relay;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use coachbook_db::{DbPool, PgStore, Store};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::{
    config::AuthSettings,
    notify::{LogNotifier, Notifier},
    relay::{ContactRelay, LogRelay, WhatsAppRelay},
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Storage for bookings, packages, time slots and admins
    pub store: Arc<dyn Store>,
    /// Outbound client notifications
    pub notifier: Arc<dyn Notifier>,
    /// Contact form forwarding
    pub relay: Arc<dyn ContactRelay>,
    /// Session token settings
    pub auth: AuthSettings,
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking flow
        .merge(routes::package::routes())
        .merge(routes::time_slot::routes())
        .merge(routes::calendar::routes())
        .merge(routes::booking::routes())
        // Contact form
        .merge(routes::contact::routes())
        // Admin session management
        .merge(routes::auth::routes())
        // Admin dashboard
        .merge(routes::admin::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Wires the Postgres store and the configured outbound channels together.
pub fn build_state(config: &config::ApiConfig, db_pool: DbPool) -> Arc<ApiState> {
    let relay: Arc<dyn ContactRelay> = match &config.whatsapp {
        Some(whatsapp) => Arc::new(WhatsAppRelay::new(whatsapp.clone())),
        None => {
            warn!("WhatsApp is not configured; contact messages will only be logged");
            Arc::new(LogRelay)
        }
    };

    Arc::new(ApiState {
        store: Arc::new(PgStore::new(db_pool)),
        notifier: Arc::new(LogNotifier),
        relay,
        auth: config.auth.clone(),
    })
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, builds the shared state, configures
/// routes and middleware, and starts the HTTP server.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = coachbook_api::config::ApiConfig::from_env()?;
/// let db_pool = coachbook_db::create_pool(&config.database_url).await?;
/// coachbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    init_tracing(config.log_level)?;

    // Create shared state with dependencies
    let state = build_state(&config, db_pool);
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

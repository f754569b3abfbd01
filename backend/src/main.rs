//! NimbusVita advisory server
//!
//! Serves current environmental readings for a location, classified into
//! human-facing categories, together with an overall health risk assessment.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use services::AdvisoryService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisory: Arc<AdvisoryService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimbus_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting NimbusVita advisory server");
    tracing::info!("Environment: {}", config.environment);

    // Misconfigured thresholds must stop the server
    shared::validate_threshold_tables().map_err(error::AppError::from)?;
    tracing::info!("Threshold tables validated");

    let advisory = AdvisoryService::from_config(&config)?;
    match advisory.live_source() {
        Some(source) => tracing::info!("Live readings from {}", source),
        None => tracing::info!("Live readings disabled"),
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        advisory: Arc::new(advisory),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "NimbusVita Advisory API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

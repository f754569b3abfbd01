//! Route definitions for the NimbusVita advisory server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/weather/current", get(handlers::get_current_weather))
        .nest("/risk", risk_routes())
        .route("/classify", post(handlers::classify_value))
}

/// Risk assessment routes
fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_risk))
        .route("/assess", post(handlers::assess_reading))
}

//! Route table for `/api/v1`.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, DashboardState};

pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Fleet
        .route("/ladles", get(handlers::list_ladles))
        .route("/ladles/:id", get(handlers::get_ladle))
        .route("/ladles/:id/history", get(handlers::get_history))
        .route("/ladles/:id/analysis", get(handlers::get_analysis))
        .route("/ladles/:id/override", post(handlers::post_override))
        .route("/ladles/:id/anomaly", post(handlers::post_anomaly))
        // Alerts and totals
        .route("/alerts", get(handlers::get_alerts))
        .route("/summary", get(handlers::get_summary))
        // Loop control
        .route("/simulation/start", post(handlers::start_simulation))
        .route("/simulation/stop", post(handlers::stop_simulation))
        .with_state(state)
}

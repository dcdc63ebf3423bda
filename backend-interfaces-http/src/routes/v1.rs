use axum::Router;

use crate::bot::BotState;
use crate::handlers::{ops_handlers, webhook_handlers};

pub fn build_router(state: BotState) -> Router {
    Router::new()
        .route(
            "/webhook",
            axum::routing::post(webhook_handlers::receive_update),
        )
        .route("/coldstart", axum::routing::get(ops_handlers::coldstart))
        .route(
            "/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

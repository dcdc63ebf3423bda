use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use tokio::time::{timeout, Duration};
use tracing::error;

use crate::bot::BotState;
use crate::middleware::authorize;

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<BotState>) -> StatusCode {
    let timeout_secs = state.app.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);

    match timeout(timeout_duration, state.app.activity_log.ping()).await {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => {
            error!("ready check failed: activity log: {}", err);
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            return StatusCode::SERVICE_UNAVAILABLE;
        }
    }

    match timeout(timeout_duration, state.app.responder.check()).await {
        Ok(Ok(_)) => StatusCode::OK,
        Ok(Err(err)) => {
            error!("ready check failed: responder: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn coldstart() -> &'static str {
    "Bot is awake!"
}

pub async fn metrics_prometheus(
    State(state): State<BotState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.app.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.app.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::bot::dispatch::dispatch_update;
use crate::bot::BotState;
use crate::error::HttpError;
use crate::middleware::verify_webhook_secret;

/// Telegram webhook delivery. Malformed payloads are acknowledged and
/// dropped so the API does not redeliver them forever.
pub async fn receive_update(
    State(state): State<BotState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<&'static str, HttpError> {
    if !verify_webhook_secret(&state.app.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    match serde_json::from_value(payload) {
        Ok(update) => dispatch_update(&state.app, &state.sessions, update).await,
        Err(err) => warn!("ignoring malformed webhook update: {}", err),
    }
    Ok("ok")
}

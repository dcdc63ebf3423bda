// Long-polling bridge used when no public webhook URL is configured

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::{info, warn};

use backend_infrastructure::TelegramResponder;
use backend_interfaces_http::bot::dispatch::dispatch_update;
use backend_interfaces_http::BotState;

const RECONNECT_DELAY_SECONDS: u64 = 5;

pub fn spawn_polling_bridge(state: BotState, telegram: Arc<TelegramResponder>) {
    tokio::spawn(async move {
        // A registered webhook blocks getUpdates, so clear it first.
        if let Err(err) = telegram.delete_webhook().await {
            warn!("failed to clear webhook before polling: {}", err);
        }
        info!("telegram polling bridge started");

        let mut offset = 0_i64;
        loop {
            match telegram
                .get_updates(offset, state.app.config.poll_timeout_seconds)
                .await
            {
                Ok(updates) => {
                    for raw in updates {
                        offset = next_offset(offset, &raw);
                        match serde_json::from_value(raw) {
                            Ok(update) => {
                                dispatch_update(&state.app, &state.sessions, update).await
                            }
                            Err(err) => warn!("ignoring malformed update: {}", err),
                        }
                    }
                }
                Err(err) => {
                    warn!(
                        "polling failed, retrying in {}s: {}",
                        RECONNECT_DELAY_SECONDS, err
                    );
                    sleep(Duration::from_secs(RECONNECT_DELAY_SECONDS)).await;
                }
            }
        }
    });
}

/// The next getUpdates offset acknowledges everything up to this update.
fn next_offset(current: i64, raw: &Value) -> i64 {
    raw.get("update_id")
        .and_then(Value::as_i64)
        .map(|id| (id + 1).max(current))
        .unwrap_or(current)
}

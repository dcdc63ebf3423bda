use chrono::Utc;
use tracing::info;

use crate::{AppError, AppState};
use backend_domain::services::timestamp::TIMESTAMP_FORMAT;
use backend_domain::{ActivityKind, ActivityRecord, LoggedActivity, NO_DETAILS, VITAMIN_D_DETAIL};

/// Appends one activity row with a server-generated timestamp in the target
/// timezone and echoes what was written for the confirmation reply.
pub async fn log_activity(
    state: &AppState,
    kind: ActivityKind,
    value_details: Option<String>,
    user_id: &str,
) -> Result<LoggedActivity, AppError> {
    let now = Utc::now().with_timezone(&state.config.timezone);
    let value_details = value_details.unwrap_or_else(|| NO_DETAILS.to_string());
    let record = ActivityRecord {
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        activity_type: kind.as_tag().to_string(),
        value_details: value_details.clone(),
        user_id: user_id.to_string(),
    };

    if let Err(err) = state.activity_log.append_activity(&record).await {
        state.metrics.record_log_error();
        return Err(AppError::Internal(err));
    }
    state.metrics.record_activity();
    info!(
        activity = kind.as_tag(),
        value = %value_details,
        user = user_id,
        "activity logged"
    );

    Ok(LoggedActivity {
        kind,
        value_details,
        date: now.format("%Y-%m-%d").to_string(),
        time: now.format("%H:%M:%S").to_string(),
    })
}

/// Logs a feeding session. The duration argument must be a whole number of
/// minutes; the stored detail keeps the "<n> mins" shape the aggregator
/// reads back.
pub async fn log_feed(
    state: &AppState,
    duration_arg: Option<&str>,
    user_id: &str,
) -> Result<LoggedActivity, AppError> {
    let minutes = duration_arg
        .map(str::trim)
        .filter(|arg| !arg.is_empty() && arg.chars().all(|ch| ch.is_ascii_digit()))
        .ok_or_else(|| {
            AppError::BadRequest("feed duration must be a whole number of minutes".to_string())
        })?;
    log_activity(
        state,
        ActivityKind::Feed,
        Some(format!("{} mins", minutes)),
        user_id,
    )
    .await
}

/// Logs a medication dose; an absent name falls back to the generic tag.
pub async fn log_medication(
    state: &AppState,
    name: Option<&str>,
    user_id: &str,
) -> Result<LoggedActivity, AppError> {
    let name = name
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("Medication");
    log_activity(
        state,
        ActivityKind::Medication,
        Some(name.to_string()),
        user_id,
    )
    .await
}

pub async fn log_vitamin_d(state: &AppState, user_id: &str) -> Result<LoggedActivity, AppError> {
    log_activity(
        state,
        ActivityKind::Medication,
        Some(VITAMIN_D_DETAIL.to_string()),
        user_id,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metrics;
    use async_trait::async_trait;
    use backend_domain::ports::{ActivityLogRepository, ChartRenderer, Responder};
    use backend_domain::services::timestamp::parse_timestamp;
    use backend_domain::services::ChartData;
    use backend_domain::RuntimeConfig;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        rows: Mutex<Vec<ActivityRecord>>,
    }

    #[async_trait]
    impl ActivityLogRepository for RecordingLog {
        async fn ensure_header(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn append_activity(&self, record: &ActivityRecord) -> anyhow::Result<()> {
            self.rows.lock().await.push(record.clone());
            Ok(())
        }

        async fn fetch_all(&self) -> anyhow::Result<Vec<ActivityRecord>> {
            Ok(self.rows.lock().await.clone())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct NullResponder;

    #[async_trait]
    impl Responder for NullResponder {
        async fn send_text(&self, _: i64, _: &str, _: bool) -> anyhow::Result<()> {
            Ok(())
        }

        async fn send_attachment(&self, _: i64, _: &str, _: &str, _: Vec<u8>) -> anyhow::Result<()> {
            Ok(())
        }

        async fn check(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct NullChart;

    impl ChartRenderer for NullChart {
        fn render(&self, _: &ChartData) -> anyhow::Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn test_config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: None,
            bot_token: "test-token".to_string(),
            webhook_secret: None,
            public_base_url: None,
            timezone: chrono_tz::Asia::Kolkata,
            poll_timeout_seconds: 30,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
        }
    }

    fn state_with(log: Arc<RecordingLog>) -> AppState {
        AppState {
            config: test_config(),
            activity_log: log,
            responder: Arc::new(NullResponder),
            chart_renderer: Arc::new(NullChart),
            metrics: Arc::new(Metrics::default()),
        }
    }

    #[tokio::test]
    async fn feed_row_keeps_the_mins_shape() {
        let log = Arc::new(RecordingLog::default());
        let state = state_with(log.clone());

        log_feed(&state, Some("15"), "caregiver_1")
            .await
            .expect("log feed");

        let rows = log.rows.lock().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].activity_type, "Feed");
        assert_eq!(rows[0].value_details, "15 mins");
        assert_eq!(rows[0].user_id, "caregiver_1");
        assert!(parse_timestamp(&rows[0].timestamp, chrono_tz::Asia::Kolkata).is_ok());
    }

    #[tokio::test]
    async fn feed_rejects_non_numeric_durations() {
        let log = Arc::new(RecordingLog::default());
        let state = state_with(log.clone());

        let err = log_feed(&state, Some("fifteen"), "caregiver_1")
            .await
            .expect_err("must reject");
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(log.rows.lock().await.is_empty());

        let err = log_feed(&state, None, "caregiver_1")
            .await
            .expect_err("must reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn plain_activities_store_the_placeholder_detail() {
        let log = Arc::new(RecordingLog::default());
        let state = state_with(log.clone());

        log_activity(&state, ActivityKind::Poop, None, "caregiver_1")
            .await
            .expect("log poop");

        let rows = log.rows.lock().await;
        assert_eq!(rows[0].activity_type, "Poop");
        assert_eq!(rows[0].value_details, "N/A");
    }

    #[tokio::test]
    async fn vitamin_d_is_stored_as_a_medication_row() {
        let log = Arc::new(RecordingLog::default());
        let state = state_with(log.clone());

        let logged = log_vitamin_d(&state, "caregiver_1").await.expect("log");
        assert_eq!(logged.kind, ActivityKind::Medication);

        let rows = log.rows.lock().await;
        assert_eq!(rows[0].activity_type, "Medication");
        assert_eq!(rows[0].value_details, "Vitamin D");
    }

    #[tokio::test]
    async fn medication_name_defaults_when_absent() {
        let log = Arc::new(RecordingLog::default());
        let state = state_with(log.clone());

        log_medication(&state, None, "caregiver_1")
            .await
            .expect("log");
        log_medication(&state, Some("  Tylenol  "), "caregiver_1")
            .await
            .expect("log");

        let rows = log.rows.lock().await;
        assert_eq!(rows[0].value_details, "Medication");
        assert_eq!(rows[1].value_details, "Tylenol");
    }
}

use chrono::{NaiveDate, Utc};
use tracing::{error, warn};

use crate::{AppError, AppState};
use backend_domain::services::window::bucket_contains;
use backend_domain::services::{aggregate, build_chart_data, render_summary};
use backend_domain::{ActivityRecord, DatedRecord, Period, WindowBucket};

/// What one summary invocation hands to the responder.
#[derive(Debug)]
pub struct SummaryResponse {
    pub text: String,
    pub chart: Option<ChartAttachment>,
}

#[derive(Debug)]
pub struct ChartAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Builds the summary reply for an optional period argument. An absent or
/// unrecognized argument reports every bucket. The query as a whole fails
/// only when the log snapshot cannot be fetched; a chart failure degrades
/// the reply to text-only.
pub async fn get_summary(
    state: &AppState,
    period: Option<Period>,
) -> Result<SummaryResponse, AppError> {
    let records = state.activity_log.fetch_all().await.map_err(|err| {
        state.metrics.record_log_error();
        error!("failed to fetch activity log: {}", err);
        AppError::Internal(err)
    })?;
    let now_date = Utc::now().with_timezone(&state.config.timezone).date_naive();
    Ok(build_response(state, &records, period, now_date))
}

fn build_response(
    state: &AppState,
    records: &[ActivityRecord],
    period: Option<Period>,
    now_date: NaiveDate,
) -> SummaryResponse {
    let tz = state.config.timezone;
    let outcome = aggregate(records, now_date, tz);

    state.metrics.record_summary_request();
    for skipped in &outcome.skipped {
        warn!(
            row = skipped.row,
            timestamp = %skipped.timestamp,
            "skipping malformed record"
        );
    }
    state.metrics.record_rows_skipped(outcome.skipped.len());

    let buckets: Vec<WindowBucket> = match period {
        Some(period) => vec![period.bucket()],
        None => WindowBucket::ALL.to_vec(),
    };
    let text = render_summary(&outcome, &buckets, tz.name());

    let chart = period
        .filter(|period| period.wants_chart())
        .and_then(|period| render_chart(state, &outcome.dated, period, now_date));

    SummaryResponse { text, chart }
}

fn render_chart(
    state: &AppState,
    dated: &[DatedRecord],
    period: Period,
    now_date: NaiveDate,
) -> Option<ChartAttachment> {
    let bucket = period.bucket();
    let subset: Vec<DatedRecord> = dated
        .iter()
        .filter(|record| bucket_contains(bucket, now_date, record.date))
        .cloned()
        .collect();
    let data = build_chart_data(&subset, bucket.label())?;
    match state.chart_renderer.render(&data) {
        Ok(bytes) => Some(ChartAttachment {
            filename: format!("activity-{}.svg", now_date),
            bytes,
        }),
        Err(err) => {
            warn!("chart render failed, sending text only: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metrics;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use backend_domain::ports::{ActivityLogRepository, ChartRenderer, Responder};
    use backend_domain::services::ChartData;
    use backend_domain::RuntimeConfig;
    use std::sync::Arc;

    struct FixedLog(Vec<ActivityRecord>);

    #[async_trait]
    impl ActivityLogRepository for FixedLog {
        async fn ensure_header(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn append_activity(&self, _: &ActivityRecord) -> anyhow::Result<()> {
            Ok(())
        }

        async fn fetch_all(&self) -> anyhow::Result<Vec<ActivityRecord>> {
            Ok(self.0.clone())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct UnavailableLog;

    #[async_trait]
    impl ActivityLogRepository for UnavailableLog {
        async fn ensure_header(&self) -> anyhow::Result<()> {
            Err(anyhow!("sheet unreachable"))
        }

        async fn append_activity(&self, _: &ActivityRecord) -> anyhow::Result<()> {
            Err(anyhow!("sheet unreachable"))
        }

        async fn fetch_all(&self) -> anyhow::Result<Vec<ActivityRecord>> {
            Err(anyhow!("sheet unreachable"))
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Err(anyhow!("sheet unreachable"))
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

    struct SvgStub;

    impl ChartRenderer for SvgStub {
        fn render(&self, data: &ChartData) -> anyhow::Result<Vec<u8>> {
            Ok(format!("<svg>{}</svg>", data.days.len()).into_bytes())
        }
    }

    struct BrokenChart;

    impl ChartRenderer for BrokenChart {
        fn render(&self, _: &ChartData) -> anyhow::Result<Vec<u8>> {
            Err(anyhow!("render failed"))
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

    fn state(log: Arc<dyn ActivityLogRepository>, chart: Arc<dyn ChartRenderer>) -> AppState {
        AppState {
            config: test_config(),
            activity_log: log,
            responder: Arc::new(NullResponder),
            chart_renderer: chart,
            metrics: Arc::new(Metrics::default()),
        }
    }

    fn record(timestamp: &str, activity_type: &str, value_details: &str) -> ActivityRecord {
        ActivityRecord {
            timestamp: timestamp.to_string(),
            activity_type: activity_type.to_string(),
            value_details: value_details.to_string(),
            user_id: "caregiver_1".to_string(),
        }
    }

    fn now() -> NaiveDate {
        "2024-01-07".parse().expect("test date")
    }

    #[test]
    fn absent_period_reports_every_bucket_without_a_chart() {
        let records = vec![record("2024-01-07 08:00:00", "Feed", "15 mins")];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(SvgStub));

        let response = build_response(&state, &records, None, now());
        assert!(response.chart.is_none());
        assert!(response.text.contains("Current Day"));
        assert!(response.text.contains("Previous Day"));
        assert!(response.text.contains("Last 7 Days"));
        assert!(response.text.contains("Last 1 Month"));
        assert!(response.text.contains("Last 3 Months"));
    }

    #[test]
    fn rolling_period_attaches_a_chart() {
        let records = vec![record("2024-01-05 08:00:00", "Pee", "N/A")];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(SvgStub));

        let response = build_response(&state, &records, Some(Period::SevenDays), now());
        let chart = response.chart.expect("chart attachment");
        assert_eq!(chart.filename, "activity-2024-01-07.svg");
        assert!(!chart.bytes.is_empty());
        assert!(response.text.contains("Last 7 Days"));
        assert!(!response.text.contains("Current Day"));
    }

    #[test]
    fn single_day_periods_never_chart() {
        let records = vec![record("2024-01-07 08:00:00", "Pee", "N/A")];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(SvgStub));

        let response = build_response(&state, &records, Some(Period::Today), now());
        assert!(response.chart.is_none());
    }

    #[test]
    fn chart_subset_honors_the_window_boundary() {
        // Ten days back is outside the 7-day window but inside the month.
        let records = vec![record("2023-12-28 08:00:00", "Pee", "N/A")];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(SvgStub));

        let week = build_response(&state, &records, Some(Period::SevenDays), now());
        assert!(week.chart.is_none());

        let month = build_response(&state, &records, Some(Period::OneMonth), now());
        assert!(month.chart.is_some());
    }

    #[test]
    fn chart_failure_degrades_to_text_only() {
        let records = vec![record("2024-01-05 08:00:00", "Pee", "N/A")];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(BrokenChart));

        let response = build_response(&state, &records, Some(Period::SevenDays), now());
        assert!(response.chart.is_none());
        assert!(response.text.contains("Last 7 Days"));
    }

    #[test]
    fn malformed_rows_do_not_poison_the_reply() {
        let records = vec![
            record("not-a-date", "Pee", "N/A"),
            record("2024-01-07 08:00:00", "Pee", "N/A"),
        ];
        let state = state(Arc::new(FixedLog(records.clone())), Arc::new(SvgStub));

        let response = build_response(&state, &records, Some(Period::Today), now());
        assert!(response.text.contains("Pee: 1"));
    }

    #[tokio::test]
    async fn unavailable_log_fails_the_whole_query() {
        let state = state(Arc::new(UnavailableLog), Arc::new(SvgStub));
        let err = get_summary(&state, None).await.expect_err("must fail");
        assert!(matches!(err, AppError::Internal(_)));
    }
}

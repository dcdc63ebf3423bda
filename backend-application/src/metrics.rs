use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    activities_logged: AtomicU64,
    log_errors: AtomicU64,
    summary_requests: AtomicU64,
    rows_skipped: AtomicU64,
    send_errors: AtomicU64,
}

impl Metrics {
    pub fn record_activity(&self) {
        self.activities_logged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_log_error(&self) {
        self.log_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_summary_request(&self) {
        self.summary_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rows_skipped(&self, count: usize) {
        self.rows_skipped.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_send_error(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let activities = self.activities_logged.load(Ordering::Relaxed);
        let log_errors = self.log_errors.load(Ordering::Relaxed);
        let summaries = self.summary_requests.load(Ordering::Relaxed);
        let skipped = self.rows_skipped.load(Ordering::Relaxed);
        let send_errors = self.send_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE sprout_activities_logged_total counter\n\
sprout_activities_logged_total {}\n\
# TYPE sprout_log_errors_total counter\n\
sprout_log_errors_total {}\n\
# TYPE sprout_summary_requests_total counter\n\
sprout_summary_requests_total {}\n\
# TYPE sprout_rows_skipped_total counter\n\
sprout_rows_skipped_total {}\n\
# TYPE sprout_send_errors_total counter\n\
sprout_send_errors_total {}\n",
            activities, log_errors, summaries, skipped, send_errors
        )
    }
}

// Summary text rendering

use chrono::{Duration, NaiveDate};

use crate::entities::AggregateOutcome;
use crate::value_objects::WindowBucket;

/// Renders the requested rollups as one reply. Pure function of the
/// aggregation outcome; one fixed-shape block per bucket, in the order given.
pub fn render_summary(
    outcome: &AggregateOutcome,
    buckets: &[WindowBucket],
    tz_label: &str,
) -> String {
    let mut text = format!("--- Activity Summary ({}) ---\n\n", tz_label);
    for bucket in buckets {
        let Some(rollup) = outcome.rollups.get(bucket) else {
            continue;
        };
        text.push_str(&format!(
            "<b>{}</b> {}:\n  Pee: {}\n  Poop: {}\n  Feeds: {} (Total {} mins)\n  Medications: {}\n  Vitamin D: {}\n\n",
            bucket.label(),
            date_annotation(*bucket, outcome.now_date),
            rollup.pee_count,
            rollup.poop_count,
            rollup.feed_count,
            rollup.feed_total_minutes,
            rollup.medication_count,
            rollup.vitamin_d_count,
        ));
    }
    text
}

fn date_annotation(bucket: WindowBucket, now_date: NaiveDate) -> String {
    match bucket.lookback_days() {
        Some(days) => format!("({} to {})", now_date - Duration::days(days - 1), now_date),
        None => match bucket {
            WindowBucket::Yesterday => format!("({})", now_date - Duration::days(1)),
            _ => format!("({})", now_date),
        },
    }
}

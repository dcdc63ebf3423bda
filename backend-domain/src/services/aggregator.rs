// Summary aggregation over a full log snapshot

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::entities::{ActivityRecord, AggregateOutcome, DatedRecord, SkippedRow, SummaryRollup};
use crate::services::timestamp::parse_record_date;
use crate::services::window::memberships;
use crate::value_objects::{ActivityKind, WindowBucket, VITAMIN_D_DETAIL};

/// Folds a log snapshot into one rollup per window bucket.
///
/// Each record is classified once and its increments fan out to every bucket
/// it belongs to. Rows whose timestamp will not parse are collected as
/// skipped and excluded from every bucket; a bad row never fails the pass.
/// Unknown activity tags parse fine but count toward nothing.
pub fn aggregate(records: &[ActivityRecord], now_date: NaiveDate, tz: Tz) -> AggregateOutcome {
    let mut rollups: BTreeMap<WindowBucket, SummaryRollup> = WindowBucket::ALL
        .iter()
        .map(|bucket| (*bucket, SummaryRollup::default()))
        .collect();
    let mut dated = Vec::new();
    let mut skipped = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let date = match parse_record_date(&record.timestamp, tz) {
            Ok(date) => date,
            Err(_) => {
                skipped.push(SkippedRow {
                    row,
                    timestamp: record.timestamp.clone(),
                });
                continue;
            }
        };
        let Some(kind) = ActivityKind::from_tag(&record.activity_type) else {
            continue;
        };

        for bucket in memberships(now_date, date) {
            if let Some(rollup) = rollups.get_mut(&bucket) {
                apply(rollup, kind, &record.value_details);
            }
        }
        dated.push(DatedRecord {
            date,
            kind,
            value_details: record.value_details.clone(),
        });
    }

    AggregateOutcome {
        now_date,
        rollups,
        dated,
        skipped,
    }
}

fn apply(rollup: &mut SummaryRollup, kind: ActivityKind, value_details: &str) {
    match kind {
        ActivityKind::Pee => rollup.pee_count += 1,
        ActivityKind::Poop => rollup.poop_count += 1,
        ActivityKind::Feed => {
            rollup.feed_count += 1;
            if let Some(minutes) = feed_minutes(value_details) {
                rollup.feed_total_minutes += minutes;
            }
        }
        ActivityKind::Medication => {
            rollup.medication_count += 1;
            if value_details == VITAMIN_D_DETAIL {
                rollup.vitamin_d_count += 1;
            }
        }
    }
}

/// Duration of a feed row, read from its free-text details.
///
/// The stored shape is "<n> mins"; the leading whitespace-delimited token is
/// taken as the minute count when it parses as an integer, and dropped
/// otherwise. The feed itself still counts either way.
fn feed_minutes(value_details: &str) -> Option<i64> {
    if !value_details.contains("mins") {
        return None;
    }
    value_details.split_whitespace().next()?.parse().ok()
}

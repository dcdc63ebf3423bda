// Aggregation outputs
// Rollups are derived per query and have no identity beyond the call

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::value_objects::{ActivityKind, WindowBucket};

/// Aggregated counters for one window bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRollup {
    pub pee_count: u32,
    pub poop_count: u32,
    pub feed_count: u32,
    pub feed_total_minutes: i64,
    pub medication_count: u32,
    pub vitamin_d_count: u32,
}

/// A record that survived timestamp parsing, reduced to what window
/// classification and charting need.
#[derive(Debug, Clone)]
pub struct DatedRecord {
    pub date: NaiveDate,
    pub kind: ActivityKind,
    pub value_details: String,
}

/// A row excluded from every bucket because its timestamp would not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub timestamp: String,
}

/// Output of one aggregation pass over a log snapshot.
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    pub now_date: NaiveDate,
    pub rollups: BTreeMap<WindowBucket, SummaryRollup>,
    pub dated: Vec<DatedRecord>,
    pub skipped: Vec<SkippedRow>,
}

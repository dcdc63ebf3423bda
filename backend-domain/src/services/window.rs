// Window membership classification

use chrono::NaiveDate;

use crate::value_objects::WindowBucket;

/// Whether a record's calendar date belongs to a bucket, both dates being in
/// the target timezone.
///
/// Rolling windows use a strict `< N` day difference anchored on today, so a
/// record dated exactly N days ago falls outside the N-day window while the
/// current day is always inside it. A record dated after `now_date` yields a
/// negative difference and lands in every rolling window; back-entered and
/// clock-skewed rows are folded in on purpose.
pub fn bucket_contains(bucket: WindowBucket, now_date: NaiveDate, record_date: NaiveDate) -> bool {
    let days_back = (now_date - record_date).num_days();
    match bucket {
        WindowBucket::Today => days_back == 0,
        WindowBucket::Yesterday => days_back == 1,
        WindowBucket::Last7Days => days_back < 7,
        WindowBucket::Last30Days => days_back < 30,
        WindowBucket::Last90Days => days_back < 90,
    }
}

/// All buckets a record belongs to, computed once per record so increments
/// can fan out without re-scanning the log per bucket.
pub fn memberships(now_date: NaiveDate, record_date: NaiveDate) -> Vec<WindowBucket> {
    WindowBucket::ALL
        .iter()
        .copied()
        .filter(|bucket| bucket_contains(*bucket, now_date, record_date))
        .collect()
}

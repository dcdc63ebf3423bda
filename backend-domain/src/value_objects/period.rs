// Window buckets and the summary period argument

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WindowBucket {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl WindowBucket {
    /// Reporting order for the "all buckets" summary.
    pub const ALL: [WindowBucket; 5] = [
        WindowBucket::Today,
        WindowBucket::Yesterday,
        WindowBucket::Last7Days,
        WindowBucket::Last30Days,
        WindowBucket::Last90Days,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WindowBucket::Today => "Current Day",
            WindowBucket::Yesterday => "Previous Day",
            WindowBucket::Last7Days => "Last 7 Days",
            WindowBucket::Last30Days => "Last 1 Month",
            WindowBucket::Last90Days => "Last 3 Months",
        }
    }

    /// Rolling windows look back this many days from today. The two
    /// single-day buckets have no lookback.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            WindowBucket::Today | WindowBucket::Yesterday => None,
            WindowBucket::Last7Days => Some(7),
            WindowBucket::Last30Days => Some(30),
            WindowBucket::Last90Days => Some(90),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Yesterday,
    SevenDays,
    OneMonth,
    ThreeMonths,
}

impl Period {
    /// Recognized arguments: today | yesterday | 7days | 1month | 3month.
    /// Anything else selects no specific period and the caller reports all
    /// buckets.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.trim().to_lowercase().as_str() {
            "today" => Some(Period::Today),
            "yesterday" => Some(Period::Yesterday),
            "7days" => Some(Period::SevenDays),
            "1month" => Some(Period::OneMonth),
            "3month" => Some(Period::ThreeMonths),
            _ => None,
        }
    }

    pub fn bucket(&self) -> WindowBucket {
        match self {
            Period::Today => WindowBucket::Today,
            Period::Yesterday => WindowBucket::Yesterday,
            Period::SevenDays => WindowBucket::Last7Days,
            Period::OneMonth => WindowBucket::Last30Days,
            Period::ThreeMonths => WindowBucket::Last90Days,
        }
    }

    /// Only rolling windows get a chart attachment.
    pub fn wants_chart(&self) -> bool {
        matches!(
            self,
            Period::SevenDays | Period::OneMonth | Period::ThreeMonths
        )
    }
}

// Activity entities
// One row of the external activity log

use serde::{Deserialize, Serialize};

use crate::value_objects::ActivityKind;

/// Column headers of the activity log, in sheet order. The first row of the
/// backing store is reserved for these and is re-created when missing.
pub const LOG_HEADERS: [&str; 4] = [
    "Timestamp",
    "Activity Type",
    "Value/Details",
    "Telegram User ID",
];

/// Placeholder detail for activities that carry no value.
pub const NO_DETAILS: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub timestamp: String,
    pub activity_type: String,
    pub value_details: String,
    pub user_id: String,
}

impl ActivityRecord {
    pub fn to_row(&self) -> [String; 4] {
        [
            self.timestamp.clone(),
            self.activity_type.clone(),
            self.value_details.clone(),
            self.user_id.clone(),
        ]
    }

    /// Rebuilds a record from a raw sheet row. Short rows are padded with
    /// empty cells so a truncated row still yields a record; the timestamp
    /// check downstream decides whether it aggregates.
    pub fn from_row(cells: &[String]) -> Self {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        Self {
            timestamp: cell(0),
            activity_type: cell(1),
            value_details: cell(2),
            user_id: cell(3),
        }
    }
}

/// Echo of a freshly appended activity, used for the confirmation reply.
#[derive(Debug, Clone)]
pub struct LoggedActivity {
    pub kind: ActivityKind,
    pub value_details: String,
    pub date: String,
    pub time: String,
}

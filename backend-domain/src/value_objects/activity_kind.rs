// Activity kind value object

use serde::{Deserialize, Serialize};

/// Detail text that marks a medication row as the Vitamin D sub-case.
pub const VITAMIN_D_DETAIL: &str = "Vitamin D";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Poop,
    Pee,
    Feed,
    Medication,
}

impl ActivityKind {
    /// The tag persisted in the Activity Type column.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ActivityKind::Poop => "Poop",
            ActivityKind::Pee => "Pee",
            ActivityKind::Feed => "Feed",
            ActivityKind::Medication => "Medication",
        }
    }

    /// Exact-match lookup. Tags outside the four known kinds are not an
    /// error; callers skip those rows entirely.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Poop" => Some(ActivityKind::Poop),
            "Pee" => Some(ActivityKind::Pee),
            "Feed" => Some(ActivityKind::Feed),
            "Medication" => Some(ActivityKind::Medication),
            _ => None,
        }
    }
}

/// Display-facing categories for the chart. A Medication record whose detail
/// is "Vitamin D" moves into the VitaminD category and out of the generic
/// Medication one; everywhere else the two stay a single kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DisplayCategory {
    Poop,
    Pee,
    Feed,
    Medication,
    VitaminD,
}

impl DisplayCategory {
    pub const ALL: [DisplayCategory; 5] = [
        DisplayCategory::Poop,
        DisplayCategory::Pee,
        DisplayCategory::Feed,
        DisplayCategory::Medication,
        DisplayCategory::VitaminD,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisplayCategory::Poop => "Poop",
            DisplayCategory::Pee => "Pee",
            DisplayCategory::Feed => "Feed",
            DisplayCategory::Medication => "Medication",
            DisplayCategory::VitaminD => "Vitamin D",
        }
    }

    /// Stable per-category color, shared by every chart.
    pub fn color(&self) -> &'static str {
        match self {
            DisplayCategory::Poop => "#a16207",
            DisplayCategory::Pee => "#2563eb",
            DisplayCategory::Feed => "#16a34a",
            DisplayCategory::Medication => "#dc2626",
            DisplayCategory::VitaminD => "#f59e0b",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn for_record(kind: ActivityKind, value_details: &str) -> Self {
        match kind {
            ActivityKind::Poop => DisplayCategory::Poop,
            ActivityKind::Pee => DisplayCategory::Pee,
            ActivityKind::Feed => DisplayCategory::Feed,
            ActivityKind::Medication => {
                if value_details == VITAMIN_D_DETAIL {
                    DisplayCategory::VitaminD
                } else {
                    DisplayCategory::Medication
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_is_exact() {
        assert_eq!(ActivityKind::from_tag("Pee"), Some(ActivityKind::Pee));
        assert_eq!(ActivityKind::from_tag("pee"), None);
        assert_eq!(ActivityKind::from_tag("Nap"), None);
        assert_eq!(ActivityKind::from_tag(""), None);
    }

    #[test]
    fn vitamin_d_detail_recategorizes_medication() {
        let category = DisplayCategory::for_record(ActivityKind::Medication, "Vitamin D");
        assert_eq!(category, DisplayCategory::VitaminD);
        let category = DisplayCategory::for_record(ActivityKind::Medication, "Tylenol");
        assert_eq!(category, DisplayCategory::Medication);
    }

    #[test]
    fn category_indexes_match_declaration_order() {
        for (position, category) in DisplayCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }
}

// Chart-ready grouping of a rolling window's records

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entities::DatedRecord;
use crate::value_objects::DisplayCategory;

/// One cluster of bars: a calendar date and a count per display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDay {
    pub date: NaiveDate,
    pub counts: [u32; DisplayCategory::ALL.len()],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub title: String,
    pub days: Vec<ChartDay>,
}

impl ChartData {
    pub fn max_count(&self) -> u32 {
        self.days
            .iter()
            .flat_map(|day| day.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Groups records by calendar date and display category, in date order.
/// Returns None when there is nothing to draw.
pub fn build_chart_data(records: &[DatedRecord], title: &str) -> Option<ChartData> {
    if records.is_empty() {
        return None;
    }
    let mut days: BTreeMap<NaiveDate, [u32; DisplayCategory::ALL.len()]> = BTreeMap::new();
    for record in records {
        let category = DisplayCategory::for_record(record.kind, &record.value_details);
        days.entry(record.date).or_default()[category.index()] += 1;
    }
    Some(ChartData {
        title: title.to_string(),
        days: days
            .into_iter()
            .map(|(date, counts)| ChartDay { date, counts })
            .collect(),
    })
}

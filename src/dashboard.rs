//! The two reactive outputs of the dashboard.
//!
//! Both are pure functions of the loaded records and the current selection.
//! They never look at each other's output, so the page may request them in
//! any order and as often as it likes.

use serde::Serialize;

use crate::aggregate::{Tone, average_rating, category_counts, total_revenue, weekly_revenue};
use crate::charts::{self, Figure};
use crate::filter::filter;
use crate::types::{FilterOptions, RecordSet, Selection};
use crate::util::format_currency;

pub const RATING_PLACEHOLDER: &str = "-- / 10";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    pub total_revenue: String,
    pub rating: RatingDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDisplay {
    pub headline: String,
    /// Absent when nothing matches the selection.
    pub detail: Option<RatingDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDetail {
    pub text: String,
    pub tone: Tone,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub line: Figure,
    pub histogram: Figure,
    pub pie: Figure,
}

pub fn update_indicators(records: &RecordSet, selection: &Selection) -> Indicators {
    let rows = filter(records.records(), selection);

    let rating = match average_rating(&rows) {
        Some(summary) => RatingDisplay {
            headline: format!("{:.2} / 10", summary.mean),
            detail: Some(RatingDetail {
                text: format!("{} {:.2}%", summary.trend.marker(), summary.deviation_pct),
                tone: summary.trend.tone(),
                color: summary.trend.tone().color(),
            }),
        },
        None => RatingDisplay {
            headline: RATING_PLACEHOLDER.to_string(),
            detail: None,
        },
    };

    Indicators {
        total_revenue: format_currency(total_revenue(&rows)),
        rating,
    }
}

pub fn update_charts(records: &RecordSet, selection: &Selection) -> Charts {
    let rows = filter(records.records(), selection);
    let gender = selection.gender();

    Charts {
        line: charts::weekly_line(&weekly_revenue(&rows), gender),
        histogram: charts::revenue_histogram(&rows, gender),
        pie: charts::category_pie(&category_counts(&rows)),
    }
}

/// Loaded data plus the dropdown options derived from it, built once at
/// startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: RecordSet,
    options: FilterOptions,
}

impl Dashboard {
    pub fn new(records: RecordSet) -> Self {
        let options = records.filter_options();
        Self { records, options }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn indicators(&self, selection: &Selection) -> Indicators {
        update_indicators(&self.records, selection)
    }

    pub fn charts(&self, selection: &Selection) -> Charts {
        update_charts(&self.records, selection)
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Record;

/// Average rating the store considers acceptable.
pub const RECOMMENDED_RATING: f64 = 7.0;

pub fn total_revenue(rows: &[&Record]) -> f64 {
    rows.iter().map(|r| r.total).sum()
}

/// Whether the average rating meets [`RECOMMENDED_RATING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Bad,
}

impl Trend {
    pub fn marker(self) -> &'static str {
        match self {
            Trend::Above => "▲",
            Trend::Below => "▼",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Trend::Above => Tone::Good,
            Trend::Below => Tone::Bad,
        }
    }
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Good => "green",
            Tone::Bad => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub mean: f64,
    /// Percentage distance of `mean` from [`RECOMMENDED_RATING`].
    pub deviation_pct: f64,
    pub trend: Trend,
}

/// `None` for an empty selection, there is no mean to report.
pub fn average_rating(rows: &[&Record]) -> Option<RatingSummary> {
    if rows.is_empty() {
        return None;
    }
    let mean = rows.iter().map(|r| r.rating).sum::<f64>() / rows.len() as f64;
    let trend = if mean >= RECOMMENDED_RATING {
        Trend::Above
    } else {
        Trend::Below
    };
    Some(RatingSummary {
        mean,
        deviation_pct: (mean - RECOMMENDED_RATING) / RECOMMENDED_RATING * 100.0,
        trend,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPoint {
    /// Positional label, `S1` for the earliest week present.
    pub label: String,
    pub week: String,
    pub total: f64,
}

/// Revenue per week bucket, oldest first. Labels are assigned after grouping,
/// so gaps between weeks never show up as missing `S` numbers.
pub fn weekly_revenue(rows: &[&Record]) -> Vec<WeeklyPoint> {
    let mut by_week: BTreeMap<&str, f64> = BTreeMap::new();
    for r in rows {
        *by_week.entry(r.week.as_str()).or_default() += r.total;
    }
    by_week
        .into_iter()
        .enumerate()
        .map(|(i, (week, total))| WeeklyPoint {
            label: format!("S{}", i + 1),
            week: week.to_string(),
            total,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub product_line: String,
    pub count: usize,
}

/// Sales per product line, in order of first appearance.
pub fn category_counts(rows: &[&Record]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for r in rows {
        match counts.iter_mut().find(|c| c.product_line == r.product_line) {
            Some(c) => c.count += 1,
            None => counts.push(CategoryCount {
                product_line: r.product_line.clone(),
                count: 1,
            }),
        }
    }
    counts
}

use chrono::NaiveDate;
use serde::Serialize;

/// One sale from the transactions file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub city: String,
    pub gender: String,
    pub product_line: String,
    pub total: f64,
    pub rating: f64,
    pub date: NaiveDate,
    /// `YYYY-WW`, Sunday-based week number. Sorts chronologically as a string.
    pub week: String,
}

impl Record {
    pub fn new(
        city: impl Into<String>,
        gender: impl Into<String>,
        product_line: impl Into<String>,
        total: f64,
        rating: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            city: city.into(),
            gender: gender.into(),
            product_line: product_line.into(),
            total,
            rating,
            week: week_key(date),
            date,
        }
    }
}

pub fn week_key(date: NaiveDate) -> String {
    date.format("%Y-%U").to_string()
}

/// The full, immutable table loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct cities and genders, each in order of first appearance.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            cities: distinct(self.records.iter().map(|r| r.city.as_str())),
            genders: distinct(self.records.iter().map(|r| r.gender.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|seen| seen == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Values offered by the two dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub genders: Vec<String>,
}

/// Current dropdown state. `None` means the control is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub city: Option<String>,
    pub gender: Option<String>,
}

impl Selection {
    /// Blank values count as "no filter".
    pub fn new(city: Option<String>, gender: Option<String>) -> Self {
        Self {
            city: non_blank(city),
            gender: non_blank(gender),
        }
    }

    /// Selected city, `None` when cleared or blank.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|v| !is_blank(v))
    }

    /// Selected gender, `None` when cleared or blank.
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref().filter(|v| !is_blank(v))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v))
}

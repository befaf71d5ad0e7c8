//! Plotly-compatible figure specifications.
//!
//! The server only describes figures; the browser page hands each one to
//! `Plotly.react` unchanged. Field names therefore follow Plotly's JSON schema.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::aggregate::{CategoryCount, WeeklyPoint};
use crate::types::Record;

pub const MALE_COLOR: &str = "#FF6347";
pub const FEMALE_COLOR: &str = "#4169E1";
pub const DEFAULT_LINE_COLOR: &str = "#8A2BE2";
pub const MUTED_COLOR: &str = "#CCCCCC";

/// Plotly's default qualitative sequence, used when no gender is highlighted.
const DEFAULT_SEQUENCE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

static GENDER_ACCENTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("Male", MALE_COLOR), ("Female", FEMALE_COLOR)]));

pub fn gender_accent(gender: &str) -> Option<&'static str> {
    GENDER_ACCENTS.get(gender).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        x: Vec<String>,
        y: Vec<f64>,
        mode: &'static str,
        line: LineStyle,
        customdata: Vec<String>,
        hovertemplate: String,
    },
    Histogram {
        name: String,
        x: Vec<f64>,
        marker: Marker,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<usize>,
        marker: PieMarker,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub line: Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub color: &'static str,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargroupgap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub tickcolor: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

impl Layout {
    fn styled(title: &str) -> Self {
        Self {
            title: Title { text: title.to_string() },
            plot_bgcolor: "#f7f7f7",
            paper_bgcolor: "#eaeaea",
            font: Font { color: "#333333" },
            xaxis: None,
            yaxis: None,
            barmode: None,
            bargap: None,
            bargroupgap: None,
        }
    }
}

fn axis(title: &str) -> Axis {
    Axis {
        title: Title { text: title.to_string() },
        tickcolor: "black",
        tickangle: None,
    }
}

/// Line colour follows the highlighted gender.
pub fn line_color(selected_gender: Option<&str>) -> &'static str {
    selected_gender
        .and_then(gender_accent)
        .unwrap_or(DEFAULT_LINE_COLOR)
}

pub fn weekly_line(points: &[WeeklyPoint], selected_gender: Option<&str>) -> Figure {
    let trace = Trace::Scatter {
        x: points.iter().map(|p| p.label.clone()).collect(),
        y: points.iter().map(|p| p.total).collect(),
        mode: "lines",
        line: LineStyle {
            color: line_color(selected_gender).to_string(),
        },
        customdata: points.iter().map(|p| p.week.clone()).collect(),
        hovertemplate:
            "<b>Week:</b> %{customdata}<br><b>Total sales:</b> %{y:,.2f} $<extra></extra>"
                .to_string(),
    };
    let mut layout = Layout::styled("Weekly total purchases");
    layout.xaxis = Some(Axis {
        tickangle: Some(0),
        ..axis("Week")
    });
    layout.yaxis = Some(axis("Total"));
    Figure {
        data: vec![trace],
        layout,
    }
}

/// Bar colour for one gender's trace. A highlighted gender with an accent
/// keeps it and mutes every other trace; otherwise the default sequence
/// applies by trace position.
pub fn histogram_color(gender: &str, position: usize, selected_gender: Option<&str>) -> &'static str {
    match selected_gender.and_then(|sel| gender_accent(sel).map(|accent| (sel, accent))) {
        Some((sel, accent)) if sel == gender => accent,
        Some(_) => MUTED_COLOR,
        None => DEFAULT_SEQUENCE[position % DEFAULT_SEQUENCE.len()],
    }
}

/// Distribution of purchase totals, one grouped trace per gender present.
pub fn revenue_histogram(rows: &[&Record], selected_gender: Option<&str>) -> Figure {
    let mut by_gender: Vec<(&str, Vec<f64>)> = Vec::new();
    for r in rows {
        match by_gender.iter_mut().find(|(g, _)| *g == r.gender) {
            Some((_, totals)) => totals.push(r.total),
            None => by_gender.push((r.gender.as_str(), vec![r.total])),
        }
    }

    let data = by_gender
        .into_iter()
        .enumerate()
        .map(|(i, (gender, totals))| Trace::Histogram {
            name: gender.to_string(),
            x: totals,
            marker: Marker {
                color: histogram_color(gender, i, selected_gender).to_string(),
            },
        })
        .collect();

    let mut layout = Layout::styled("Distribution of purchase totals");
    layout.xaxis = Some(axis("Total"));
    layout.yaxis = Some(axis("count"));
    layout.barmode = Some("group");
    layout.bargap = Some(0.2);
    layout.bargroupgap = Some(0.1);
    Figure { data, layout }
}

pub fn category_pie(counts: &[CategoryCount]) -> Figure {
    let trace = Trace::Pie {
        labels: counts.iter().map(|c| c.product_line.clone()).collect(),
        values: counts.iter().map(|c| c.count).collect(),
        marker: PieMarker {
            line: Outline {
                color: "grey",
                width: 1,
            },
        },
    };
    Figure {
        data: vec![trace],
        layout: Layout::styled("Product categories"),
    }
}

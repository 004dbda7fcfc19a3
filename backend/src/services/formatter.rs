//! Reshaping of report rows for the presentation layer.
//!
//! Rows become either a label/value split for charting or the fixed-width HTML
//! table fragment of the full listing. Listing markup is rendered by askama,
//! so store text is escaped there; chart data is embedded through `script_json`.

use askama::Template;
use serde::Serialize;

use crate::database::models::BreweryRow;

/// Pixel widths of the listing cells in column order; the last cell is unsized.
const CELL_WIDTHS: [Option<u16>; 12] = [
    Some(220),
    Some(45),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    Some(50),
    None,
];

/// One chart series: the company label and its yearly values.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub state: String,
    pub values: Vec<Option<f64>>,
    pub total: Option<f64>,
}

impl ChartSeries {
    /// Ranking total as printed next to the chart.
    pub fn total_display(&self) -> String {
        format_barrels(self.total)
    }
}

/// Year labels plus one series per row, ready for a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartReport {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Chart data serialized for a `<script>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScript {
    pub labels: String,
    pub values: String,
    pub label_company: String,
}

impl ChartScript {
    pub fn new(report: &ChartReport) -> Result<Self, serde_json::Error> {
        let values: Vec<_> = report.series.iter().map(|s| &s.values).collect();
        let label_company: Vec<_> = report
            .series
            .iter()
            .map(|s| (s.label.as_str(), s.state.as_str()))
            .collect();
        Ok(Self {
            labels: script_json(&report.labels)?,
            values: script_json(&values)?,
            label_company: script_json(&label_company)?,
        })
    }
}

/// Entry of the company selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOption {
    pub name: String,
    pub selected: bool,
}

/// Label/value split: the company is the label, the year columns the values.
pub fn split_row(row: &BreweryRow) -> ChartSeries {
    ChartSeries {
        label: row.company.trim().to_string(),
        state: row.state.trim().to_string(),
        values: row.barrels.to_vec(),
        total: row.recent_total(),
    }
}

pub fn chart_report(labels: Vec<String>, rows: &[BreweryRow]) -> ChartReport {
    ChartReport {
        labels,
        series: rows.iter().map(split_row).collect(),
    }
}

pub fn company_options(names: &[String], selected: &str) -> Vec<CompanyOption> {
    let selected = selected.trim();
    names
        .iter()
        .map(|name| CompanyOption {
            name: name.clone(),
            selected: name.trim() == selected,
        })
        .collect()
}

/// Empty for a missing year; whole numbers print without a fraction.
pub fn format_barrels(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One cell of the listing; `width` is `None` for the trailing unsized cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCell {
    pub width: Option<u16>,
    pub text: String,
}

#[derive(Template)]
#[template(path = "craft_rows.html")]
struct CraftRows {
    rows: Vec<Vec<ListingCell>>,
}

fn listing_cells(row: &BreweryRow) -> Vec<ListingCell> {
    let texts = [row.company.trim().to_string(), row.state.trim().to_string()]
        .into_iter()
        .chain(row.barrels.iter().map(|b| format_barrels(*b)));

    CELL_WIDTHS
        .iter()
        .zip(texts)
        .map(|(width, text)| ListingCell {
            width: *width,
            text,
        })
        .collect()
}

/// The full listing: one single-row table per brewery, concatenated.
pub fn craft_table(rows: &[BreweryRow]) -> Result<String, askama::Error> {
    CraftRows {
        rows: rows.iter().map(listing_cells).collect(),
    }
    .render()
}

/// JSON that can sit inside a `<script>` element without closing it early.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

//! Askama page templates for the report routes.

use askama::Template;

use crate::services::formatter::{ChartScript, ChartSeries, CompanyOption};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "chart_top.html")]
pub struct TopChartPage {
    pub title: String,
    pub chart: ChartScript,
    pub series: Vec<ChartSeries>,
}

#[derive(Template)]
#[template(path = "chart_show.html")]
pub struct CompanyChartPage {
    pub title: String,
    pub chart: ChartScript,
    pub companies: Vec<CompanyOption>,
}

/// `craft_data` is already escaped markup from the formatter.
#[derive(Template)]
#[template(path = "craft.html")]
pub struct CraftPage {
    pub craft_data: String,
}

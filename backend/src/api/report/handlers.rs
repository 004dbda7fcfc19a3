//! Handler functions for the report pages.
//!
//! These functions extract request parameters, ask `services::reports` for the
//! report data and render it through the page templates.

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::info;

use super::views::{CompanyChartPage, CraftPage, IndexPage, TopChartPage};
use crate::database::queries::DEFAULT_TOP;
use crate::errors::AppError;
use crate::server::AppState;
use crate::services::formatter::ChartScript;
use crate::services::reports::DEFAULT_COMPANY;

/// Company picked through the selection form or the query string.
#[derive(Debug, Default, Deserialize)]
pub struct CompanySelection {
    pub company: Option<String>,
}

impl CompanySelection {
    /// The requested name, or the default company when missing or blank.
    pub fn name(&self) -> &str {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COMPANY)
    }
}

pub async fn landing_page() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage.render()?))
}

pub async fn top_report(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let report = state.reports.top(DEFAULT_TOP).await?;
    let page = TopChartPage {
        title: "Top Ten Companies".to_string(),
        chart: ChartScript::new(&report)?,
        series: report.series,
    };
    Ok(Html(page.render()?))
}

pub async fn company_report(
    State(state): State<AppState>,
    Query(selection): Query<CompanySelection>,
) -> Result<Html<String>, AppError> {
    render_company(&state, selection.name()).await
}

pub async fn select_company(
    State(state): State<AppState>,
    Form(selection): Form<CompanySelection>,
) -> Result<Html<String>, AppError> {
    info!(company = selection.name(), "company selected");
    render_company(&state, selection.name()).await
}

async fn render_company(state: &AppState, name: &str) -> Result<Html<String>, AppError> {
    let report = state
        .reports
        .company(name)
        .await?
        .ok_or_else(|| AppError::NotFound(name.to_string()))?;
    let page = CompanyChartPage {
        title: name.to_string(),
        chart: ChartScript::new(&report.chart)?,
        companies: report.companies,
    };
    Ok(Html(page.render()?))
}

pub async fn craft_listing(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let craft_data = state.reports.craft_listing().await?;
    Ok(Html(CraftPage { craft_data }.render()?))
}

//! Defines the HTTP routes for the report pages.
//!
//! These routes map the dashboard paths to the handler functions that build
//! each report.

use axum::{routing::get, Router};

use super::handlers::{company_report, craft_listing, landing_page, select_company, top_report};
use crate::server::AppState;

pub fn report_router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/top", get(top_report))
        .route("/company", get(company_report).post(select_company))
        .route("/craft", get(craft_listing))
}

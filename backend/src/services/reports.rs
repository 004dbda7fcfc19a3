//! Report assembly on top of the injected store adapter.
//!
//! `ReportService` owns the `StoreAdapter` handle, runs the queries each report
//! needs and hands formatter output to the API layer.

use std::sync::Arc;

use adapters::StoreAdapter;
use tracing::info;

use crate::database::models::year_labels;
use crate::database::{queries, DatabaseError};
use crate::errors::AppError;
use crate::services::formatter::{self, ChartReport, CompanyOption};

/// Company shown when the request does not pick one.
pub const DEFAULT_COMPANY: &str = "Boston Beer Co";

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyReport {
    pub chart: ChartReport,
    pub companies: Vec<CompanyOption>,
}

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn StoreAdapter>,
}

impl ReportService {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn StoreAdapter {
        self.store.as_ref()
    }

    pub async fn top(&self, limit: u32) -> Result<ChartReport, DatabaseError> {
        let rows = queries::top_n(self.store(), limit).await?;
        info!(limit, rows = rows.len(), "top report");
        Ok(formatter::chart_report(year_labels(), &rows))
    }

    /// `Ok(None)` when the store has no row for `name`.
    pub async fn company(&self, name: &str) -> Result<Option<CompanyReport>, DatabaseError> {
        let Some(row) = queries::by_company(self.store(), name).await? else {
            info!(company = name, "company report: no match");
            return Ok(None);
        };
        let names = queries::company_names(self.store()).await?;
        info!(company = name, choices = names.len(), "company report");

        Ok(Some(CompanyReport {
            chart: formatter::chart_report(year_labels(), std::slice::from_ref(&row)),
            companies: formatter::company_options(&names, name),
        }))
    }

    /// The full ranked listing as an HTML table fragment.
    pub async fn craft_listing(&self) -> Result<String, AppError> {
        let rows = queries::all_ranked(self.store()).await?;
        info!(rows = rows.len(), "craft listing");
        Ok(formatter::craft_table(&rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{brewery, seeded_store};

    #[tokio::test]
    async fn top_report_splits_rows_into_chart_series() {
        let (_dir, store) = seeded_store(&[
            brewery("Alpha Brewing", "CO", Some(100.0)),
            brewery("Beta Brewing", "OR", None),
            brewery("Gamma Brewing", "WA", Some(50.0)),
        ])
        .await;
        let service = ReportService::new(Arc::new(store));

        let report = service.top(10).await.unwrap();
        assert_eq!(report.labels.len(), 10);
        let labels: Vec<_> = report.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Alpha Brewing", "Gamma Brewing", "Beta Brewing"]);
        assert!(report.series.iter().all(|s| s.values.len() == 10));
    }

    #[tokio::test]
    async fn company_report_lists_choices_and_marks_selection() {
        let (_dir, store) = seeded_store(&[
            brewery(" Boston Beer Co ", "MA", Some(100.0)),
            brewery("Sierra Nevada Brewing Co", "CA", Some(90.0)),
        ])
        .await;
        let service = ReportService::new(Arc::new(store));

        let report = service.company(DEFAULT_COMPANY).await.unwrap().unwrap();
        assert_eq!(report.chart.series.len(), 1);
        assert_eq!(report.chart.series[0].label, "Boston Beer Co");
        assert_eq!(report.chart.series[0].values.len(), 10);
        assert_eq!(report.companies.len(), 2);
        assert!(report.companies[0].selected);
        assert!(!report.companies[1].selected);
    }

    #[tokio::test]
    async fn company_report_is_none_without_a_match() {
        let (_dir, store) = seeded_store(&[brewery("Boston Beer Co", "MA", Some(1.0))]).await;
        let service = ReportService::new(Arc::new(store));
        assert!(service.company("Nobody Brewing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn craft_listing_has_one_table_per_row() {
        let fixture: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|name| brewery(name, "NY", Some(10.0)))
            .collect();
        let (_dir, store) = seeded_store(&fixture).await;
        let service = ReportService::new(Arc::new(store));

        let html = service.craft_listing().await.unwrap();
        assert_eq!(html.matches("<table").count(), fixture.len());
    }
}

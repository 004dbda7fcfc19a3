//! Database query functions (Data Access Objects).
//!
//! Every report the dashboard serves is one `ReportQuery` variant. A variant
//! turns into a parameterized `Statement`; caller-supplied values are bound,
//! never written into the SQL text. The async functions at the bottom run a
//! query through any `StoreAdapter` and decode the rows.

use adapters::{Statement, StoreAdapter};
use tracing::debug;

use super::models::{barrels_column, BreweryRow, RANKING_YEARS, YEARS};
use super::{DatabaseError, TABLE};

/// Row count of the default top report.
pub const DEFAULT_TOP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportQuery {
    /// Highest producers over the ranking years, at most `limit` rows.
    TopN { limit: u32 },
    /// The first row whose trimmed company name equals the trimmed `name`.
    ByCompany { name: String },
    /// Every row, ranked like `TopN`.
    AllRanked,
    /// Distinct company names for selection lists.
    CompanyNames,
}

fn select_columns() -> String {
    ["company".to_string(), "state".to_string()]
        .into_iter()
        .chain(YEARS.iter().map(|year| barrels_column(*year)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Descending by the ranking-year sum. A sum with any missing year is NULL
/// (SQLite also stores NaN as NULL) and goes last; ties keep storage order.
fn ranking_order() -> String {
    let total = YEARS[..RANKING_YEARS]
        .iter()
        .map(|year| barrels_column(*year))
        .collect::<Vec<_>>()
        .join(" + ");
    format!("({total}) DESC NULLS LAST, rowid ASC")
}

/// `TRIM` over the ASCII whitespace `str::trim` removes; one-argument `TRIM`
/// only strips spaces.
fn trimmed(expr: &str) -> String {
    format!("TRIM({expr}, ' ' || char(9) || char(10) || char(11) || char(12) || char(13))")
}

impl ReportQuery {
    pub fn top(limit: u32) -> Self {
        ReportQuery::TopN { limit }
    }

    pub fn company(name: impl Into<String>) -> Self {
        ReportQuery::ByCompany { name: name.into() }
    }

    pub fn statement(&self) -> Statement {
        match self {
            ReportQuery::TopN { limit } => Statement::new(format!(
                "SELECT {} FROM {TABLE} ORDER BY {} LIMIT ?1",
                select_columns(),
                ranking_order()
            ))
            .bind(i64::from(*limit)),
            ReportQuery::ByCompany { name } => Statement::new(format!(
                "SELECT {} FROM {TABLE} WHERE {} = {} LIMIT 1",
                select_columns(),
                trimmed("company"),
                trimmed("?1")
            ))
            .bind(name.as_str()),
            ReportQuery::AllRanked => Statement::new(format!(
                "SELECT {} FROM {TABLE} ORDER BY {}",
                select_columns(),
                ranking_order()
            )),
            ReportQuery::CompanyNames => Statement::new(format!(
                "SELECT DISTINCT {} AS company FROM {TABLE} ORDER BY company",
                trimmed("company")
            )),
        }
    }
}

async fn fetch_rows(
    store: &dyn StoreAdapter,
    query: &ReportQuery,
) -> Result<Vec<BreweryRow>, DatabaseError> {
    let rows = store.fetch_all(&query.statement()).await?;
    debug!(?query, rows = rows.len(), "report query finished");
    rows.iter()
        .map(|row| BreweryRow::try_from(row).map_err(DatabaseError::from))
        .collect()
}

pub async fn top_n(store: &dyn StoreAdapter, limit: u32) -> Result<Vec<BreweryRow>, DatabaseError> {
    fetch_rows(store, &ReportQuery::top(limit)).await
}

/// `Ok(None)` when no company matches.
pub async fn by_company(
    store: &dyn StoreAdapter,
    name: &str,
) -> Result<Option<BreweryRow>, DatabaseError> {
    let rows = fetch_rows(store, &ReportQuery::company(name)).await?;
    Ok(rows.into_iter().next())
}

pub async fn all_ranked(store: &dyn StoreAdapter) -> Result<Vec<BreweryRow>, DatabaseError> {
    fetch_rows(store, &ReportQuery::AllRanked).await
}

pub async fn company_names(store: &dyn StoreAdapter) -> Result<Vec<String>, DatabaseError> {
    let rows = store
        .fetch_all(&ReportQuery::CompanyNames.statement())
        .await?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get(0).and_then(|value| value.as_text()))
        .map(str::to_string)
        .collect())
}

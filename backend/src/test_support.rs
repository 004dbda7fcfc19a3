//! Fixture helpers shared by the backend test modules.

use adapters::{SqliteAdapter, Statement, StoreAdapter};
use tempfile::TempDir;

use crate::database::models::{barrels_column, BreweryRow, RANKING_YEARS, YEARS, YEAR_COUNT};
use crate::database::{ensure_schema, TABLE};

/// A row whose ranking years add up to `recent_total`. `None` leaves the most
/// recent year empty so the total is missing. Older years hold a constant.
pub fn brewery(company: &str, state: &str, recent_total: Option<f64>) -> BreweryRow {
    let mut barrels = [Some(1_000.0); YEAR_COUNT];
    match recent_total {
        Some(total) => barrels[..RANKING_YEARS].fill(Some(total / RANKING_YEARS as f64)),
        None => barrels[0] = None,
    }
    BreweryRow {
        company: company.to_string(),
        state: state.to_string(),
        barrels,
    }
}

pub async fn insert_row(store: &dyn StoreAdapter, row: &BreweryRow) {
    let columns = YEARS
        .iter()
        .map(|year| barrels_column(*year))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=YEAR_COUNT + 2)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ");
    let statement = row.barrels.iter().fold(
        Statement::new(format!(
            "INSERT INTO {TABLE} (company, state, {columns}) VALUES ({placeholders})"
        ))
        .bind(row.company.as_str())
        .bind(row.state.as_str()),
        |statement, barrels| statement.bind(*barrels),
    );
    store.execute(&statement).await.unwrap();
}

/// A throwaway SQLite store holding `rows` in insertion order.
pub async fn seeded_store(rows: &[BreweryRow]) -> (TempDir, SqliteAdapter) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteAdapter::from_path(dir.path().join("brewasis.db"));
    ensure_schema(&store).await.unwrap();
    for row in rows {
        insert_row(&store, row).await;
    }
    (dir, store)
}

//! Module for the brewery statistics store: table layout, row decoding and
//! report queries.
//!
//! The store itself is reached through an injected `adapters::StoreAdapter`;
//! nothing in here holds a connection.

pub mod models;
pub mod queries;

use adapters::{AdapterError, Statement, StoreAdapter};
use thiserror::Error;
use tracing::info;

use models::{barrels_column, DecodeError, YEARS};

/// Table holding one row per company.
pub const TABLE: &str = "craft";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("malformed report row: {0}")]
    Decode(#[from] DecodeError),
}

/// DDL for the `craft` table; year columns are nullable.
pub fn schema_statement() -> Statement {
    let years = YEARS
        .iter()
        .map(|year| format!("{} REAL", barrels_column(*year)))
        .collect::<Vec<_>>()
        .join(", ");
    Statement::new(format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (company TEXT NOT NULL, state TEXT, {years})"
    ))
}

/// Creates the `craft` table when it does not exist yet.
pub async fn ensure_schema(store: &dyn StoreAdapter) -> Result<(), DatabaseError> {
    store.execute(&schema_statement()).await?;
    info!(table = TABLE, "store schema ready");
    Ok(())
}

//! SQLite-specific adapter implementation of `StoreAdapter`.
//!
//! This file contains the connection handling, parameter binding and the
//! conversion of driver rows into the crate's generic `Row` model.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Decode, Row as _, Sqlite, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::errors::AdapterError;
use crate::models::{Row, Statement, Value};
use crate::StoreAdapter;

/// Opens a new SQLite connection for every statement and closes it afterwards.
#[derive(Debug, Clone)]
pub struct SqliteAdapter {
    options: SqliteConnectOptions,
}

impl SqliteAdapter {
    /// Builds an adapter from a `sqlite:` URL such as `sqlite://brewasis.db?mode=rwc`.
    pub fn new(url: &str) -> Result<Self, AdapterError> {
        if !url.starts_with("sqlite:") {
            return Err(AdapterError::InvalidUrl {
                url: url.to_string(),
                reason: "expected a sqlite: url".to_string(),
            });
        }
        let options =
            SqliteConnectOptions::from_str(url).map_err(|err| AdapterError::InvalidUrl {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self { options })
    }

    /// Builds an adapter for a database file, creating it on first connect.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        }
    }

    async fn connect(&self) -> Result<SqliteConnection, AdapterError> {
        self.options
            .connect()
            .await
            .map_err(|err| AdapterError::Connection(err.to_string()))
    }
}

/// Close failures are logged, not returned.
async fn release(conn: SqliteConnection) {
    if let Err(err) = conn.close().await {
        warn!(error = %err, "failed to close store connection");
    }
}

fn bind_all<'q>(sql: &'q str, params: &'q [Value]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, param| match param {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(n) => query.bind(*n),
            Value::Real(r) => query.bind(*r),
            Value::Text(text) => query.bind(text.as_str()),
        })
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<Value, AdapterError> {
    let raw = row
        .try_get_raw(index)
        .map_err(|err| AdapterError::Query(err.to_string()))?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let decoded = match type_name.as_str() {
        "INTEGER" => <i64 as Decode<'_, Sqlite>>::decode(raw).map(Value::Integer),
        "REAL" => <f64 as Decode<'_, Sqlite>>::decode(raw).map(Value::Real),
        "TEXT" => <String as Decode<'_, Sqlite>>::decode(raw).map(Value::Text),
        _ => {
            return Err(AdapterError::UnsupportedType {
                column: index,
                type_name,
            })
        }
    };
    decoded.map_err(|err| AdapterError::Query(format!("column {index}: {err}")))
}

fn decode_row(row: &SqliteRow) -> Result<Row, AdapterError> {
    (0..row.len())
        .map(|index| decode_value(row, index))
        .collect::<Result<Vec<_>, _>>()
        .map(Row)
}

#[async_trait]
impl StoreAdapter for SqliteAdapter {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, AdapterError> {
        debug!(sql = %statement.sql, params = statement.params.len(), "fetching rows");
        let mut conn = self.connect().await?;
        let result = bind_all(&statement.sql, &statement.params)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        let rows = result.map_err(|err| AdapterError::Query(err.to_string()))?;
        debug!(rows = rows.len(), "fetched rows");
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, AdapterError> {
        debug!(sql = %statement.sql, params = statement.params.len(), "executing statement");
        let mut conn = self.connect().await?;
        let result = bind_all(&statement.sql, &statement.params)
            .execute(&mut conn)
            .await;
        release(conn).await;

        result
            .map(|done| done.rows_affected())
            .map_err(|err| AdapterError::Query(err.to_string()))
    }
}

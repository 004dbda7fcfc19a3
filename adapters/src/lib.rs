//! Core `adapters` crate for abstracting access to the brewery statistics store.
//!
//! This crate defines the `StoreAdapter` trait, which outlines the two operations
//! the backend needs from a relational store (fetch a result set, execute a
//! statement), and provides the concrete SQLite implementation.

pub mod errors;
pub mod models;
pub mod sqlite;

pub use errors::AdapterError;
pub use models::{Row, Statement, Value};
pub use sqlite::SqliteAdapter;

use async_trait::async_trait;

/// Connection-per-call access to a relational store.
///
/// Implementations open a fresh connection for every call and must release it
/// before returning, whether the statement succeeded or not.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Runs a query and returns the complete result set in store order.
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, AdapterError>;

    /// Runs a statement that returns no rows, reporting how many rows it touched.
    async fn execute(&self, statement: &Statement) -> Result<u64, AdapterError>;
}

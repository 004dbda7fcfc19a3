//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while connecting to the store,
//! running a statement, or converting store values into the generic row model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid store url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("cannot connect to store: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("column {column} has unsupported type {type_name}")]
    UnsupportedType { column: usize, type_name: String },
}

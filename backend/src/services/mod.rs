//! Module for core business logic services.
//!
//! This module encapsulates the report service, which runs the report queries
//! against the store, and the formatter that reshapes rows for the templates.

pub mod formatter;
pub mod reports;

//! Central module for organizing the application's HTTP endpoints.
//!
//! This module acts as a top-level container for the API domains. The
//! dashboard has a single one: the brewery reports.

pub mod report;

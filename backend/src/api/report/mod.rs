//! Module for the brewery report pages.
//!
//! This module defines the routes, handlers and page templates for the
//! landing page, the top-N chart, the single-company chart and the full listing.

pub mod handlers;
pub mod routes;
pub mod views;

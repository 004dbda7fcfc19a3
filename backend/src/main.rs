//! Main entry point for the Brewasis backend.
//!
//! This file initializes logging, loads the settings, prepares the store
//! adapter and starts the Axum web server with the report routes.

mod api;
mod config;
mod database;
mod errors;
mod server;
mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use adapters::SqliteAdapter;
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Settings;
use crate::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let settings = Settings::from_env().context("loading settings")?;
    info!(database = %settings.database_url, addr = %settings.bind_addr, "starting brewasis");

    let store = SqliteAdapter::new(&settings.database_url).context("opening the store")?;
    database::ensure_schema(&store)
        .await
        .context("preparing the store schema")?;

    Server::new(&settings, Arc::new(store))
        .run()
        .await
        .context("serving HTTP")
}

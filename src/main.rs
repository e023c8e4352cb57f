use anyhow::{Context, Result};
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::db::init_db;
use crate::router::respond;

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod integrations;
mod requests;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,imobiliaria=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(site = %config.site_name, "configuration loaded");

    let addr = config.bind_addr;
    let max_workers = config.max_workers;
    let schema_path = config.schema_path.clone();

    let app = App::from_config(config).context("Failed to build application")?;
    init_db(&app.db, &schema_path).context("Database initialization failed")?;

    tracing::info!(%addr, max_workers, "starting server");
    Server::bind(&addr)
        .max_workers(max_workers)
        .serve(move |req, _info| respond(req, &app))
        .context("Server ended with error")?;

    tracing::info!("server shut down cleanly");
    Ok(())
}

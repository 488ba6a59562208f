//! # Catalog Server
//!
//! Loads configuration, wires the cache backend and services, and runs the
//! cache walk-through against a seeded in-memory catalog.

use catalog_cache::metrics::register_metrics;
use catalog_config::ConfigLoader;
use catalog_core::telemetry::init_tracing;
use catalog_server::app::App;
use catalog_server::{startup, walkthrough};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_tracing(&config.logging)?;
    register_metrics();

    startup::print_banner();
    info!("Starting {} v{}", config.app.name, config.app.version);
    startup::print_startup_info(&config);

    let app = App::build(&config).await?;
    info!(backend = app.port.backend(), "Cache backend ready");

    walkthrough::run(&app.services).await?;

    info!("Shutting down");
    Ok(())
}

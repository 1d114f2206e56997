mod app;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;
use std::sync::Arc;

use services::TableSwapActions;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting swaps backend"
    );

    // Create database pool
    let pool = db::create_pool(&settings).await?;

    // Swap transitions go through the narrow table client over the same pool
    let swap_actions = Arc::new(TableSwapActions::new(pool.clone()));

    // Create application state
    let state = app::AppState::new(pool, settings.clone(), swap_actions);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

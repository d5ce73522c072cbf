mod config;
mod errors;
mod models;
mod routes;
mod state;
mod table_client;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_app;
use crate::state::AppState;
use crate::table_client::TableClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting users gateway v{}", env!("CARGO_PKG_VERSION"));

    // Initialize remote table client
    let table = TableClient::new(&config)?;
    info!(
        "Remote table client initialized (table: {}, credentials: {})",
        table.base_url(),
        config.backendless_app_id.is_some()
    );

    let state = AppState {
        users: Arc::new(table),
    };

    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

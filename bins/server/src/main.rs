//! Closeout API Server
//!
//! Main entry point for the branch-closing checklist backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use closeout_api::{AppState, create_router};
use closeout_core::store::{Credentials, StoreClient, StoreConfig, TokenProvider};
use closeout_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "closeout=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the storage provider client
    let store_config = StoreConfig::new(Credentials::new(
        config.dropbox.app_key.clone(),
        config.dropbox.app_secret.clone(),
        config.dropbox.refresh_token.clone(),
    ))
    .with_root_folder(config.dropbox.root_folder.clone());
    info!(root_folder = %store_config.root_folder, "storage provider configured");

    let http = reqwest::Client::new();
    let state = AppState {
        store: Arc::new(StoreClient::new(http.clone(), store_config.clone())),
        tokens: Arc::new(TokenProvider::new(http, store_config)),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

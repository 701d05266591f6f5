//! Cakeshop Backend - user registration and token-authorized cake profiles
//! Mission: Serve the user API behind signed bearer-token authentication

use anyhow::{Context, Result};
use cakeshop_backend::auth::{AuthState, JwtService, UserStore};
use cakeshop_backend::config::Config;
use cakeshop_backend::routes::create_router;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    // A key-material failure here is fatal: the service cannot issue or
    // validate a single token without its keypair.
    let jwt = JwtService::new(&config.private_key_path, &config.public_key_path)
        .context("Failed to load or generate signing keys")?;

    let state = AuthState {
        users: Arc::new(UserStore::new()),
        jwt: Arc::new(jwt),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Good bye 🍰");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Interrupt received, shutting down");
    }
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cakeshop_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

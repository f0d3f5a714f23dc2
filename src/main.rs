// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intra-Companion API Server
//!
//! Authenticates against the 42 intranet and serves profile lookups by login.

use intra_companion::{config::Config, services::IntraClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Missing credentials are a deployment problem; refuse to start.
    let config = Config::from_env()?;
    tracing::info!(port = config.port, api_url = %config.api_url, "Starting Intra-Companion API");

    let client = IntraClient::from_config(&config)?;
    let state = Arc::new(AppState::new(config.clone(), client));

    // A failed first exchange is not fatal: clients can hit the reconnect route.
    match state.connect().await {
        Ok(_) => tracing::info!("Connected to intranet API"),
        Err(e) => tracing::warn!(
            error = %e,
            retryable = e.is_retryable(),
            "Initial token exchange failed, starting disconnected"
        ),
    }

    // Build router
    let app = intra_companion::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("intra_companion=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

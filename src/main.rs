// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 5ive API Server
//!
//! Serves the engagement core of the 5ive microlearning app: session
//! credentials, streak tracking, and the points leaderboard.

use fiveive_api::{
    config::Config,
    services::{Leaderboard, StreakTracker, TokenService},
    store::{redis::connect, Stores},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment. A missing signing secret is
    // fatal: the process must not serve traffic without it.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting 5ive API");

    // Connect to Redis (sessions, streaks, leaderboard)
    let conn = connect(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");
    tracing::info!(url = %config.redis_url, "Connected to Redis");

    let stores = Stores::redis(conn, &config);

    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_secs)
        .expect("JWT signing secret must be configured");
    let streaks = StreakTracker::new(stores.streaks.clone());
    let leaderboard = Leaderboard::new(stores.leaderboard.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        stores,
        tokens,
        streaks,
        leaderboard,
    });

    // Build router
    let app = fiveive_api::routes::create_router(state);

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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fiveive_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fiveive_api::config::Config;
use fiveive_api::routes::create_router;
use fiveive_api::services::{Leaderboard, StreakTracker, TokenService};
use fiveive_api::store::Stores;
use fiveive_api::AppState;
use std::sync::Arc;

/// Create a test app backed by in-memory stores.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let stores = Stores::in_memory(&config);

    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_secs)
        .expect("test signing key must construct");
    let streaks = StreakTracker::new(stores.streaks.clone());
    let leaderboard = Leaderboard::new(stores.leaderboard.clone());

    let state = Arc::new(AppState {
        config,
        stores,
        tokens,
        streaks,
        leaderboard,
    });

    (create_router(state.clone()), state)
}

/// Mint a valid credential for a user through the app's own issuer.
#[allow(dead_code)]
pub fn mint_token(state: &Arc<AppState>, user_id: &str) -> String {
    state
        .tokens
        .issue(user_id)
        .expect("issuing a test credential should succeed")
}

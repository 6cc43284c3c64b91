// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! 5ive engagement core: credentials, sessions, streaks, leaderboard.
//!
//! This crate provides the backend engine for the 5ive microlearning app:
//! signed session credentials, a revocable session record per user, the
//! consecutive-day streak tracker, and the score-ranked leaderboard. The
//! content CRUD layer (lessons, flashcards, quizzes, profiles) lives
//! elsewhere and drives this core through [`services`] and [`store`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{Leaderboard, StreakTracker, TokenService};
use store::Stores;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub tokens: TokenService,
    pub streaks: StreakTracker,
    pub leaderboard: Leaderboard,
}

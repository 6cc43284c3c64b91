// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod leaderboard;
pub mod streak;
pub mod token;

pub use leaderboard::Leaderboard;
pub use streak::{StreakOutcome, StreakTracker};
pub use token::TokenService;

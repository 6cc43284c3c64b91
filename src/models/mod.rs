// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod leaderboard;
pub mod session;

pub use leaderboard::{RankInfo, RankedUser};
pub use session::SessionRecord;

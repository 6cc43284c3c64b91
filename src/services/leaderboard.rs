// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Global score ranking.
//!
//! A thin layer over the store's sorted set: increments are atomic in the
//! store, and rank/top-N queries read the score order directly instead of
//! rescanning users. Entries appear on first increment and are never
//! deleted in normal operation.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{RankInfo, RankedUser};
use crate::store::LeaderboardStore;

/// Default number of rows for top-N queries.
pub const DEFAULT_TOP_LIMIT: usize = 10;

#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn LeaderboardStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn LeaderboardStore>) -> Self {
        Self { store }
    }

    /// Atomically add `delta` (positive or negative) to the user's score.
    /// Returns the new cumulative score.
    pub async fn award(&self, user_id: &str, delta: i64) -> Result<i64> {
        let score = self.store.increment_score(user_id, delta).await?;
        tracing::debug!(user_id, delta, score, "Score updated");
        Ok(score)
    }

    /// The `limit` highest-scoring users with 1-based ranks attached.
    /// A limit beyond the population simply returns everyone.
    pub async fn top(&self, limit: usize) -> Result<Vec<RankedUser>> {
        let rows = self.store.top(limit).await?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (user_id, score))| RankedUser {
                rank: i as u64 + 1,
                user_id,
                score,
            })
            .collect())
    }

    /// The user's 1-based rank and score; `{rank: None, score: 0}` for a
    /// user with no entry.
    pub async fn rank_of(&self, user_id: &str) -> Result<RankInfo> {
        let rank = self.store.rank(user_id).await?;
        let score = self.store.score(user_id).await?;

        Ok(RankInfo {
            rank: rank.map(|r| r + 1),
            score: score.unwrap_or(0),
        })
    }
}

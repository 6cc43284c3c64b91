//! Leaderboard response shapes.

use serde::{Deserialize, Serialize};

/// One row of a top-N leaderboard query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUser {
    /// 1-based rank, descending by score
    pub rank: u64,
    pub user_id: String,
    pub score: i64,
}

/// A single user's standing.
///
/// `rank` is `None` for users with no leaderboard entry; an unranked user is
/// an ordinary state, not an error, and reads back with a score of zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankInfo {
    pub rank: Option<u64>,
    pub score: i64,
}

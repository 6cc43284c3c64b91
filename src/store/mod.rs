//! Ephemeral per-user state (Redis).
//!
//! Sessions, streak reference dates, and the leaderboard all live in a
//! shared key-value store. The store is the single source of truth: nothing
//! here is cached in-process across requests, so concurrent server
//! instances never serve stale session or score data.
//!
//! ## Key Patterns
//!
//! ```text
//! session:{user_id}   → SessionRecord JSON (expires after 24 hours)
//! streak:{user_id}    → last activity date "YYYY-MM-DD" (expires after 30 days)
//! leaderboard         → sorted set, member user_id scored by points
//! ```
//!
//! ## Usage in Handlers
//!
//! Stores are accessed via `state.stores`:
//!
//! ```ignore
//! async fn handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
//!     state.stores.sessions.set_session(&user_id, &record).await?;
//! }
//! ```

pub mod memory;
pub mod redis;

pub use self::memory::{MemoryLeaderboardStore, MemorySessionStore, MemoryStreakStore};
pub use self::redis::{RedisLeaderboardStore, RedisSessionStore, RedisStreakStore};

use crate::config::Config;
use crate::error::AppError;
use crate::models::SessionRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Revocable session liveness records, one per user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert the session record, replacing any prior one and resetting
    /// its time-to-live.
    async fn set_session(&self, user_id: &str, record: &SessionRecord) -> Result<(), AppError>;

    /// The current record, or `None` if absent or expired.
    async fn get_session(&self, user_id: &str) -> Result<Option<SessionRecord>, AppError>;

    /// Remove the record immediately (logout).
    async fn delete_session(&self, user_id: &str) -> Result<(), AppError>;
}

/// Last-activity calendar dates backing the streak tracker.
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// The user's last recorded activity date, if any.
    async fn last_activity(&self, user_id: &str) -> Result<Option<NaiveDate>, AppError>;

    /// Write a new reference date, refreshing the record's time-to-live.
    async fn set_last_activity(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

/// The global score-ordered set of users.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Atomically add `delta` to the user's score, creating the entry at
    /// `delta` if absent. Returns the new cumulative score.
    async fn increment_score(&self, user_id: &str, delta: i64) -> Result<i64, AppError>;

    /// The `limit` highest-scoring members, descending, with scores.
    async fn top(&self, limit: usize) -> Result<Vec<(String, i64)>, AppError>;

    /// 0-based descending rank, or `None` if the user has no entry.
    async fn rank(&self, user_id: &str) -> Result<Option<u64>, AppError>;

    /// Current score, or `None` if the user has no entry.
    async fn score(&self, user_id: &str) -> Result<Option<i64>, AppError>;
}

/// Collection of all ephemeral stores.
#[derive(Clone)]
pub struct Stores {
    pub sessions: Arc<dyn SessionStore>,
    pub streaks: Arc<dyn StreakStore>,
    pub leaderboard: Arc<dyn LeaderboardStore>,
}

impl Stores {
    /// Redis-backed stores sharing one connection manager.
    pub fn redis(conn: ::redis::aio::ConnectionManager, config: &Config) -> Self {
        Self {
            sessions: Arc::new(RedisSessionStore::new(
                conn.clone(),
                config.session_ttl_secs,
            )),
            streaks: Arc::new(RedisStreakStore::new(conn.clone(), config.streak_ttl_secs)),
            leaderboard: Arc::new(RedisLeaderboardStore::new(conn)),
        }
    }

    /// In-memory stores for tests and offline development.
    pub fn in_memory(config: &Config) -> Self {
        Self {
            sessions: Arc::new(MemorySessionStore::new(config.session_ttl_secs)),
            streaks: Arc::new(MemoryStreakStore::new()),
            leaderboard: Arc::new(MemoryLeaderboardStore::new()),
        }
    }
}

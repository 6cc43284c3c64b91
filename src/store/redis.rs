// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redis-backed store implementations.
//!
//! Sessions and streak dates are plain keys written with `SET ... EX`; the
//! leaderboard is a single sorted set driven by `ZINCRBY` so concurrent
//! increments from different requests never lose updates. Rank and top-N
//! reads are `ZREVRANK` / `ZREVRANGE WITHSCORES`, O(log N) in the store.

use async_trait::async_trait;
use chrono::NaiveDate;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::time::Duration;

use crate::error::AppError;
use crate::models::SessionRecord;
use crate::store::{LeaderboardStore, SessionStore, StreakStore};

const SESSION_PREFIX: &str = "session:";
const STREAK_PREFIX: &str = "streak:";
const LEADERBOARD_KEY: &str = "leaderboard";

/// Stored date format for streak reference dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Open a managed Redis connection.
pub async fn connect(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(3)
        .set_connection_timeout(Duration::from_secs(2));

    let client = Client::open(redis_url).map_err(store_err)?;
    client
        .get_connection_manager_with_config(config)
        .await
        .map_err(store_err)
}

fn store_err(e: redis::RedisError) -> AppError {
    AppError::Store(e.to_string())
}

// ─── Sessions ────────────────────────────────────────────────

pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set_session(&self, user_id: &str, record: &SessionRecord) -> Result<(), AppError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| AppError::Store(format!("Session encode failed: {}", e)))?;

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(format!("{}{}", SESSION_PREFIX, user_id), payload, self.ttl_secs)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn get_session(&self, user_id: &str) -> Result<Option<SessionRecord>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(format!("{}{}", SESSION_PREFIX, user_id))
            .await
            .map_err(store_err)?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| AppError::Store(format!("Session decode failed: {}", e)))
        })
        .transpose()
    }

    async fn delete_session(&self, user_id: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(format!("{}{}", SESSION_PREFIX, user_id))
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

// ─── Streaks ─────────────────────────────────────────────────

pub struct RedisStreakStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisStreakStore {
    pub fn new(conn: ConnectionManager, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }
}

#[async_trait]
impl StreakStore for RedisStreakStore {
    async fn last_activity(&self, user_id: &str) -> Result<Option<NaiveDate>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(format!("{}{}", STREAK_PREFIX, user_id))
            .await
            .map_err(store_err)?;

        raw.map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .map_err(|e| AppError::Store(format!("Bad streak date {:?}: {}", s, e)))
        })
        .transpose()
    }

    async fn set_last_activity(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(
                format!("{}{}", STREAK_PREFIX, user_id),
                date.format(DATE_FORMAT).to_string(),
                self.ttl_secs,
            )
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

// ─── Leaderboard ─────────────────────────────────────────────

pub struct RedisLeaderboardStore {
    conn: ConnectionManager,
}

impl RedisLeaderboardStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl LeaderboardStore for RedisLeaderboardStore {
    async fn increment_score(&self, user_id: &str, delta: i64) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        // Sorted-set scores are floats, but every write is an integer
        // increment, so the narrowing read-back is exact.
        let score: f64 = conn
            .zincr(LEADERBOARD_KEY, user_id, delta)
            .await
            .map_err(store_err)?;
        Ok(score as i64)
    }

    async fn top(&self, limit: usize) -> Result<Vec<(String, i64)>, AppError> {
        if limit == 0 {
            // A stop index of -1 would mean "the whole set".
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let rows: Vec<(String, f64)> = conn
            .zrevrange_withscores(LEADERBOARD_KEY, 0, limit as isize - 1)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|(member, score)| (member, score as i64))
            .collect())
    }

    async fn rank(&self, user_id: &str) -> Result<Option<u64>, AppError> {
        let mut conn = self.conn.clone();
        let rank: Option<u64> = conn
            .zrevrank(LEADERBOARD_KEY, user_id)
            .await
            .map_err(store_err)?;
        Ok(rank)
    }

    async fn score(&self, user_id: &str) -> Result<Option<i64>, AppError> {
        let mut conn = self.conn.clone();
        let score: Option<f64> = conn
            .zscore(LEADERBOARD_KEY, user_id)
            .await
            .map_err(store_err)?;
        Ok(score.map(|s| s as i64))
    }
}

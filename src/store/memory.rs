// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store implementations for tests and offline development.
//!
//! Session records honor their time-to-live lazily, on read. Streak records
//! skip the retention window entirely: tests drive the tracker with explicit
//! timestamps, and enforcing the 30-day expiry is the real store's job.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::SessionRecord;
use crate::store::{LeaderboardStore, SessionStore, StreakStore};

fn poisoned<T>(_: T) -> AppError {
    AppError::Store("Store lock poisoned".to_string())
}

// ─── Sessions ────────────────────────────────────────────────

struct SessionEntry {
    record: SessionRecord,
    expires_at: DateTime<Utc>,
}

pub struct MemorySessionStore {
    ttl_secs: u64,
    entries: Mutex<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set_session(&self, user_id: &str, record: &SessionRecord) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(
            user_id.to_string(),
            SessionEntry {
                record: record.clone(),
                expires_at: Utc::now() + Duration::seconds(self.ttl_secs as i64),
            },
        );
        Ok(())
    }

    async fn get_session(&self, user_id: &str) -> Result<Option<SessionRecord>, AppError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        match entries.get(user_id) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(Some(entry.record.clone())),
            Some(_) => {
                entries.remove(user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_session(&self, user_id: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.remove(user_id);
        Ok(())
    }
}

// ─── Streaks ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStreakStore {
    dates: Mutex<HashMap<String, NaiveDate>>,
}

impl MemoryStreakStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StreakStore for MemoryStreakStore {
    async fn last_activity(&self, user_id: &str) -> Result<Option<NaiveDate>, AppError> {
        let dates = self.dates.lock().map_err(poisoned)?;
        Ok(dates.get(user_id).copied())
    }

    async fn set_last_activity(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let mut dates = self.dates.lock().map_err(poisoned)?;
        dates.insert(user_id.to_string(), date);
        Ok(())
    }
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryLeaderboardStore {
    scores: Mutex<HashMap<String, i64>>,
}

impl MemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members sorted by score descending, user id ascending on ties.
    fn sorted(scores: &HashMap<String, i64>) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, i64)> = scores
            .iter()
            .map(|(user, score)| (user.clone(), *score))
            .collect();
        rows.sort_by_key(|(user, score)| (Reverse(*score), user.clone()));
        rows
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboardStore {
    async fn increment_score(&self, user_id: &str, delta: i64) -> Result<i64, AppError> {
        let mut scores = self.scores.lock().map_err(poisoned)?;
        let score = scores.entry(user_id.to_string()).or_insert(0);
        *score += delta;
        Ok(*score)
    }

    async fn top(&self, limit: usize) -> Result<Vec<(String, i64)>, AppError> {
        let scores = self.scores.lock().map_err(poisoned)?;
        let mut rows = Self::sorted(&scores);
        rows.truncate(limit);
        Ok(rows)
    }

    async fn rank(&self, user_id: &str) -> Result<Option<u64>, AppError> {
        let scores = self.scores.lock().map_err(poisoned)?;
        if !scores.contains_key(user_id) {
            return Ok(None);
        }
        Ok(Self::sorted(&scores)
            .iter()
            .position(|(user, _)| user == user_id)
            .map(|pos| pos as u64))
    }

    async fn score(&self, user_id: &str) -> Result<Option<i64>, AppError> {
        let scores = self.scores.lock().map_err(poisoned)?;
        Ok(scores.get(user_id).copied())
    }
}

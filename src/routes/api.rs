// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users: activity, points, leaderboard.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{RankInfo, RankedUser};
use crate::services::leaderboard::DEFAULT_TOP_LIMIT;
use crate::AppState;

/// API routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activity", post(record_activity))
        .route("/api/points", post(award_points))
        .route("/api/streak", get(get_streak))
        .route("/api/leaderboard/top", get(leaderboard_top))
        .route("/api/leaderboard/rank", get(leaderboard_rank))
}

// ─── Activity / Streak ───────────────────────────────────────

#[derive(Serialize)]
pub struct ActivityResponse {
    /// False only when a gap of 2+ days broke the streak
    pub continued: bool,
}

/// Record a tracked activity (login, lesson or quiz completion).
///
/// When the streak extends to a new calendar day, the configured bonus is
/// awarded through the leaderboard before responding. If that award fails
/// after the streak write committed, the error propagates; the lost bonus
/// is an accepted gap, not a hidden one.
async fn record_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ActivityResponse>> {
    let outcome = state
        .streaks
        .record_activity(&user.user_id, chrono::Utc::now())
        .await?;

    if outcome.extended() {
        let bonus = state.config.streak_bonus_points;
        let score = state.leaderboard.award(&user.user_id, bonus).await?;
        tracing::info!(user_id = %user.user_id, bonus, score, "Streak bonus awarded");
    }

    Ok(Json(ActivityResponse {
        continued: outcome.continued(),
    }))
}

#[derive(Serialize)]
pub struct StreakResponse {
    /// Last recorded activity date ("YYYY-MM-DD"), if still retained
    pub last_activity: Option<String>,
}

/// Get the caller's last recorded activity date.
async fn get_streak(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StreakResponse>> {
    let last = state.streaks.last_activity(&user.user_id).await?;

    Ok(Json(StreakResponse {
        last_activity: last.map(|d| d.format("%Y-%m-%d").to_string()),
    }))
}

// ─── Points / Leaderboard ────────────────────────────────────

#[derive(Deserialize)]
struct PointsBody {
    points: i64,
}

#[derive(Serialize)]
pub struct PointsResponse {
    /// New cumulative score after the increment
    pub score: i64,
}

/// Award points to the caller (quiz scoring, achievements).
async fn award_points(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PointsBody>,
) -> Result<Json<PointsResponse>> {
    let score = state.leaderboard.award(&user.user_id, body.points).await?;

    Ok(Json(PointsResponse { score }))
}

#[derive(Deserialize)]
struct TopQuery {
    limit: Option<usize>,
}

const MAX_TOP_LIMIT: usize = 100;

/// Get the top of the leaderboard.
async fn leaderboard_top(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<RankedUser>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT).min(MAX_TOP_LIMIT);
    let top = state.leaderboard.top(limit).await?;

    Ok(Json(top))
}

/// Get the caller's rank and score.
async fn leaderboard_rank(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RankInfo>> {
    let info = state.leaderboard.rank_of(&user.user_id).await?;

    Ok(Json(info))
}

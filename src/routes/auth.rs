// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle routes.
//!
//! Login and registration live in the content layer; after verifying a
//! user it issues a credential and writes the session record exactly the
//! way `refresh` does below. These routes cover the lifecycle the core
//! owns: refresh, logout, and session liveness.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::SessionRecord;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session_status))
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Re-issue a credential and overwrite the session record.
///
/// The new record replaces whatever was stored before (single session per
/// user) and restarts the session time-to-live.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TokenResponse>> {
    let token = state.tokens.issue(&user.user_id)?;

    let record = SessionRecord::new(token.clone(), chrono::Utc::now());
    state
        .stores
        .sessions
        .set_session(&user.user_id, &record)
        .await?;

    tracing::info!(user_id = %user.user_id, "Session refreshed");

    Ok(Json(TokenResponse { token }))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Log out: delete the session record.
///
/// The credential itself stays cryptographically valid until its own
/// expiry; only session liveness is revoked here.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    state.stores.sessions.delete_session(&user.user_id).await?;

    tracing::info!(user_id = %user.user_id, "Logged out");

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub active: bool,
}

/// Is this user currently logged in?
async fn session_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionStatusResponse>> {
    let session = state.stores.sessions.get_session(&user.user_id).await?;

    Ok(Json(SessionStatusResponse {
        active: session.is_some(),
    }))
}

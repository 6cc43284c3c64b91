// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle tests.
//!
//! Logout revokes session liveness, not the credential's intrinsic
//! validity: after `POST /auth/logout` the session record is gone, but the
//! same credential still passes verification until its own expiry.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn authed(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_refresh_creates_session_record() {
    let (app, state) = common::create_test_app();
    let token = common::mint_token(&state, "u1");

    assert!(state
        .stores
        .sessions
        .get_session("u1")
        .await
        .unwrap()
        .is_none());

    let response = app
        .clone()
        .oneshot(authed(Method::POST, "/auth/refresh", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let new_token = body["token"].as_str().unwrap();

    // The stored record carries the newly issued credential.
    let record = state
        .stores
        .sessions
        .get_session("u1")
        .await
        .unwrap()
        .expect("session record should exist after refresh");
    assert_eq!(record.token, new_token);
}

#[tokio::test]
async fn test_new_session_replaces_prior_record() {
    use fiveive_api::models::SessionRecord;

    let (_, state) = common::create_test_app();
    let sessions = &state.stores.sessions;

    let first = SessionRecord::new("credential-one".to_string(), chrono::Utc::now());
    let second = SessionRecord::new("credential-two".to_string(), chrono::Utc::now());

    sessions.set_session("u1", &first).await.unwrap();
    sessions.set_session("u1", &second).await.unwrap();

    // Single session per user: the new record replaced the old outright.
    let stored = sessions.get_session("u1").await.unwrap().unwrap();
    assert_eq!(stored.token, "credential-two");
}

#[tokio::test]
async fn test_logout_revokes_session_but_not_credential() {
    let (app, state) = common::create_test_app();
    let token = common::mint_token(&state, "u1");

    // Establish a session, confirm it is live.
    app.clone()
        .oneshot(authed(Method::POST, "/auth/refresh", &token))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(authed(Method::GET, "/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["active"], true);

    // Logout deletes the record.
    let response = app
        .clone()
        .oneshot(authed(Method::POST, "/auth/logout", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed(Method::GET, "/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["active"], false);
    assert!(state
        .stores
        .sessions
        .get_session("u1")
        .await
        .unwrap()
        .is_none());

    // The unexpired credential still authenticates protected routes.
    let response = app
        .oneshot(authed(Method::GET, "/api/streak", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

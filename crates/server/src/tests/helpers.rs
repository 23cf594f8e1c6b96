// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::reminder::LogTransport;
use crate::{AppState, build_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use bocadillo_domain::OrderCalendar;
use bocadillo_persistence::Persistence;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Thursday 2025-03-06, 10:00 in Madrid. Ordering is open.
pub fn thursday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 6, 9, 0, 0).unwrap()
}

/// Thursday 2025-03-06, 18:00 in Madrid. Past the cutoff.
pub fn thursday_evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 6, 17, 0, 0).unwrap()
}

/// Helper to create test app state with in-memory persistence.
pub fn create_test_app_state(clock: fn() -> DateTime<Utc>) -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        calendar: OrderCalendar::default(),
        clock,
        transport: Arc::new(LogTransport),
        delivery_timeout: Duration::from_secs(1),
    }
}

/// Identity headers for a request.
pub enum As {
    Nobody,
    Member(&'static str),
    Admin,
}

/// Sends one request through the router and returns status and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    identity: As,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    builder = match identity {
        As::Nobody => builder,
        As::Member(user_id) => builder
            .header("x-user-id", user_id)
            .header("x-user-name", user_id),
        As::Admin => builder
            .header("x-user-id", "admin-1")
            .header("x-user-name", "Admin")
            .header("x-user-role", "admin"),
    };
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Builds a router over fresh state.
pub fn create_test_router(clock: fn() -> DateTime<Utc>) -> Router {
    build_router(create_test_app_state(clock))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bocadillo_audit::Cause;
use bocadillo_domain::OrderCalendar;
use bocadillo_persistence::Persistence;
use chrono::{DateTime, TimeZone, Utc};

use crate::{AuthenticatedActor, OrderRequest, Role, SpecialRequest, place_order};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("admin-1"),
        Some(String::from("Admin")),
        Role::Admin,
    )
}

pub fn create_test_member(user_id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(user_id.to_string(), None, Role::Member)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Thursday 2025-03-06 at `hour` UTC. Madrid is UTC+1, so 16 is the cutoff.
pub fn thursday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 6, hour, 0, 0).unwrap()
}

/// Monday 2025-03-10 at 10:00 UTC, the start of week 11.
pub fn next_monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap()
}

pub fn create_order_request(name: &str, ingredients: &[&str]) -> OrderRequest {
    OrderRequest {
        display_name: name.to_string(),
        size: String::from("NORMAL"),
        bread: String::from("NORMAL"),
        ingredients: ingredients.iter().map(|i| (*i).to_string()).collect(),
        combo: None,
    }
}

pub fn create_special_request() -> SpecialRequest {
    SpecialRequest {
        size: String::from("LARGE"),
        bread: String::from("NORMAL"),
        ingredients: vec![String::from("Jamon"), String::from("Brie")],
    }
}

/// Places an order for `user_id` and returns its id.
pub fn place_test_order(
    persistence: &mut Persistence,
    user_id: &str,
    ingredients: &[&str],
    now: DateTime<Utc>,
) -> i64 {
    place_order(
        persistence,
        &OrderCalendar::default(),
        now,
        create_order_request(user_id, ingredients),
        &create_test_member(user_id),
        create_test_cause(),
    )
    .expect("Failed to place test order")
    .order
    .order_id
}

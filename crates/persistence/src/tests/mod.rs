// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod catalog_tests;
mod initialization_tests;
mod special_tests;
mod subscription_tests;

use crate::Persistence;
use bocadillo::{
    Command, OrderChange, OrderingContext, Requester, TransitionResult, apply,
};
use bocadillo_audit::{Actor, Cause};
use bocadillo_domain::{Bread, OrderCalendar, OrderDraft, Size, UserId, WeekKey};
use chrono::{DateTime, TimeZone, Utc};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("member"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Thursday 2025-03-06 at `hour` UTC, inside the ordering window until 16.
pub fn thursday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 6, hour, 0, 0).unwrap()
}

pub fn test_week() -> WeekKey {
    WeekKey::new(10, 2025).unwrap()
}

pub fn create_test_draft(name: &str, ingredients: &[&str]) -> OrderDraft {
    OrderDraft {
        display_name: name.to_string(),
        size: Size::Normal,
        bread: Bread::Wholegrain,
        ingredients: ingredients.iter().map(|i| (*i).to_string()).collect(),
        combo: None,
    }
}

/// Places an order for `owner` through the core rules and stores it.
pub fn place_test_order(
    persistence: &mut Persistence,
    owner: &str,
    ingredients: &[&str],
    now: DateTime<Utc>,
) -> i64 {
    let calendar: OrderCalendar = OrderCalendar::default();
    let context: OrderingContext<'_> = OrderingContext::new(&calendar, None, now);
    let result: TransitionResult = apply(
        &context,
        None,
        Command::PlaceOrder {
            draft: create_test_draft(owner, ingredients),
        },
        &Requester::new(UserId::new(owner), false),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert!(matches!(result.change, OrderChange::Insert(_)));

    persistence
        .persist_order_transition(&result)
        .unwrap()
        .record_id
        .unwrap()
}

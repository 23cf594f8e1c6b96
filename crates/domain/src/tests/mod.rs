// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod catalog;
mod error;

use crate::{Bread, Order, OrderDraft, Size, UserId, WeekKey};
use chrono::{DateTime, TimeZone, Utc};

pub fn create_test_draft(ingredients: &[&str]) -> OrderDraft {
    OrderDraft {
        display_name: String::from("Ana"),
        size: Size::Normal,
        bread: Bread::Normal,
        ingredients: ingredients.iter().map(|i| (*i).to_string()).collect(),
        combo: None,
    }
}

pub fn create_test_instant(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

pub fn create_test_order(owner: &str, ingredients: &[&str], week: u32) -> Order {
    Order::new(
        UserId::new(owner),
        create_test_draft(ingredients),
        WeekKey::new(week, 2025).unwrap(),
        create_test_instant(6, 10),
    )
}

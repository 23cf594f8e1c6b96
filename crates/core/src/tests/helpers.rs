// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Requester;
use bocadillo_audit::{Actor, Cause};
use bocadillo_domain::{
    Bread, CatalogDraft, CatalogEntry, Order, OrderDraft, Size, SpecialDraft, UserId, WeekKey,
    normalize_order_draft,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("user-1"), String::from("member"))
}

pub fn create_test_admin_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("HTTP request"))
}

pub fn create_test_requester(user_id: &str) -> Requester {
    Requester::new(UserId::new(user_id), false)
}

pub fn create_test_admin() -> Requester {
    Requester::new(UserId::new("admin-1"), true)
}

/// Thursday 2025-03-06 at `hour` UTC. Madrid is UTC+1 on that date.
pub fn thursday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 6, hour, 0, 0).unwrap()
}

pub fn current_week() -> WeekKey {
    WeekKey::new(10, 2025).unwrap()
}

pub fn create_test_draft() -> OrderDraft {
    OrderDraft {
        display_name: String::from("  ana "),
        size: Size::Normal,
        bread: Bread::Normal,
        ingredients: vec![String::from(" Ham "), String::from("Cheese")],
        combo: None,
    }
}

/// An order as it sits in storage, with its draft already normalized.
pub fn create_stored_order(order_id: i64, owner: &str, week: WeekKey) -> Order {
    let mut order: Order = Order::new(
        UserId::new(owner),
        normalize_order_draft(create_test_draft()),
        week,
        thursday_at(8),
    );
    order.order_id = Some(order_id);
    order
}

pub fn create_special_draft() -> SpecialDraft {
    SpecialDraft {
        size: Size::Large,
        bread: Bread::Normal,
        ingredients: vec![String::from("Pork loin"), String::from("Piquillo peppers")],
    }
}

pub fn create_catalog_draft(name: &str) -> CatalogDraft {
    CatalogDraft {
        name: name.to_string(),
        category: None,
        available: None,
        sort_order: None,
    }
}

pub fn create_catalog_entry(ingredient_id: i64, name: &str) -> CatalogEntry {
    let mut entry: CatalogEntry = CatalogEntry::from_draft(create_catalog_draft(name));
    entry.ingredient_id = Some(ingredient_id);
    entry
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bocadillo_domain::OrderCalendar;

use crate::{
    ApiError, CountInfo, SetPriceRequest, get_global_statistics, get_user_statistics,
    set_order_price,
};

use super::helpers::{
    create_test_admin, create_test_cause, create_test_member, place_test_order,
    setup_test_persistence, thursday_at,
};

fn count(label: &str, count: usize) -> CountInfo {
    CountInfo {
        label: label.to_string(),
        count,
    }
}

#[test]
fn test_global_statistics_rank_ties_by_label() {
    let mut persistence = setup_test_persistence();
    let calendar = OrderCalendar::default();
    place_test_order(&mut persistence, "user-a", &["Ham", "Cheese"], thursday_at(8));
    place_test_order(&mut persistence, "user-b", &["Ham", "Tomato"], thursday_at(9));
    place_test_order(&mut persistence, "user-c", &["Cheese"], thursday_at(10));

    let stats = get_global_statistics(
        &mut persistence,
        &calendar,
        thursday_at(11),
        &create_test_admin(),
    )
    .unwrap();

    assert_eq!(stats.scope, "global");
    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.current_week_orders, 3);
    assert_eq!(
        stats.top_ingredients,
        vec![count("Cheese", 2), count("Ham", 2), count("Tomato", 1)]
    );
    assert_eq!(stats.sizes, vec![count("NORMAL", 3), count("LARGE", 0)]);
    assert_eq!(stats.trend.len(), 1);
    assert_eq!(stats.trend[0].count, 3);
    assert_eq!(stats.spend_by_user.len(), 3);
}

#[test]
fn test_global_statistics_include_spend() {
    let mut persistence = setup_test_persistence();
    let calendar = OrderCalendar::default();
    let admin = create_test_admin();
    let id = place_test_order(&mut persistence, "user-a", &["Ham"], thursday_at(8));
    place_test_order(&mut persistence, "user-b", &["Ham"], thursday_at(9));
    set_order_price(
        &mut persistence,
        &calendar,
        thursday_at(10),
        id,
        SetPriceRequest { price: 3.25 },
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let stats =
        get_global_statistics(&mut persistence, &calendar, thursday_at(11), &admin).unwrap();

    assert!((stats.total_spend - 3.25).abs() < f64::EPSILON);
    assert_eq!(stats.spend_by_user[0].user_id, "user-a");
    assert!((stats.spend_by_user[1].total - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_global_statistics_require_admin() {
    let mut persistence = setup_test_persistence();

    let result = get_global_statistics(
        &mut persistence,
        &OrderCalendar::default(),
        thursday_at(11),
        &create_test_member("user-a"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_user_statistics_only_cover_caller() {
    let mut persistence = setup_test_persistence();
    place_test_order(&mut persistence, "user-a", &["Ham"], thursday_at(8));
    place_test_order(&mut persistence, "user-b", &["Tomato"], thursday_at(9));

    let stats = get_user_statistics(
        &mut persistence,
        &OrderCalendar::default(),
        thursday_at(11),
        &create_test_member("user-a"),
    )
    .unwrap();

    assert_eq!(stats.scope, "user");
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.top_ingredients, vec![count("Ham", 1)]);
    assert!(stats.spend_by_user.is_empty());
}

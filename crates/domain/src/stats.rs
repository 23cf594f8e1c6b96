// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only statistics over orders.
//!
//! All rankings sort by descending count and break ties by ascending label
//! (byte order), so equal counts always come back in the same order.

use crate::order::{Bread, Order, Size, UserId};
use crate::week::WeekKey;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Length of the ranked lists.
pub const TOP_N: usize = 10;
/// Length of the trailing trend, in days (eight ISO weeks).
pub const TREND_DAYS: i64 = 56;

/// A label with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    pub label: String,
    pub count: usize,
}

/// Orders per size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCount {
    pub size: Size,
    pub count: usize,
}

/// Orders per bread type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadCount {
    pub bread: Bread,
    pub count: usize,
}

/// Orders in one week bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCount {
    pub week: WeekKey,
    pub count: usize,
}

/// Spend of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpend {
    pub owner: UserId,
    /// Display name of the user's most recent order.
    pub display_name: String,
    pub order_count: usize,
    pub total_cents: i64,
}

fn rank(counts: HashMap<&str, usize>, limit: usize) -> Vec<RankedCount> {
    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(label, count)| RankedCount {
            label: label.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    ranked.truncate(limit);
    ranked
}

/// The most frequent individual ingredients.
#[must_use]
pub fn top_ingredients(orders: &[Order], limit: usize) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ingredient in orders.iter().flat_map(|o| o.ingredients.iter()) {
        *counts.entry(ingredient.as_str()).or_insert(0) += 1;
    }
    rank(counts, limit)
}

/// The most frequent combo references. Orders without one are skipped.
#[must_use]
pub fn top_combos(orders: &[Order], limit: usize) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for combo in orders.iter().filter_map(|o| o.combo.as_deref()) {
        *counts.entry(combo).or_insert(0) += 1;
    }
    rank(counts, limit)
}

/// Orders per size, every size listed.
#[must_use]
pub fn size_distribution(orders: &[Order]) -> Vec<SizeCount> {
    Size::ALL
        .iter()
        .map(|size| SizeCount {
            size: *size,
            count: orders.iter().filter(|o| o.size == *size).count(),
        })
        .collect()
}

/// Orders per bread type, every bread listed.
#[must_use]
pub fn bread_distribution(orders: &[Order]) -> Vec<BreadCount> {
    Bread::ALL
        .iter()
        .map(|bread| BreadCount {
            bread: *bread,
            count: orders.iter().filter(|o| o.bread == *bread).count(),
        })
        .collect()
}

/// Sum of prices in cents; unset prices count as zero.
#[must_use]
pub fn total_spend(orders: &[Order]) -> i64 {
    orders.iter().map(Order::price_cents_or_zero).sum()
}

/// Spend per user, highest first, ties by user id.
#[must_use]
pub fn spend_by_user(orders: &[Order]) -> Vec<UserSpend> {
    let mut by_user: BTreeMap<&UserId, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        by_user.entry(&order.owner).or_default().push(order);
    }

    let mut spends: Vec<UserSpend> = by_user
        .into_iter()
        .map(|(owner, orders)| {
            let display_name: String = orders
                .iter()
                .max_by_key(|o| o.created_at)
                .map(|o| o.display_name.clone())
                .unwrap_or_default();
            UserSpend {
                owner: owner.clone(),
                display_name,
                order_count: orders.len(),
                total_cents: orders.iter().map(|o| o.price_cents_or_zero()).sum(),
            }
        })
        .collect();
    spends.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.owner.cmp(&b.owner))
    });
    spends
}

/// Orders per week created in the trailing [`TREND_DAYS`], ascending by week.
#[must_use]
pub fn weekly_trend(orders: &[Order], now: DateTime<Utc>) -> Vec<WeekCount> {
    let since: DateTime<Utc> = now - Duration::days(TREND_DAYS);
    let mut buckets: BTreeMap<WeekKey, usize> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.created_at >= since) {
        *buckets.entry(order.week).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(week, count)| WeekCount { week, count })
        .collect()
}

/// A full statistics rollup over a set of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub current_week_orders: usize,
    pub total_spend_cents: i64,
    pub top_ingredients: Vec<RankedCount>,
    pub top_combos: Vec<RankedCount>,
    pub sizes: Vec<SizeCount>,
    pub breads: Vec<BreadCount>,
    pub trend: Vec<WeekCount>,
}

impl OrderStatistics {
    /// Computes every aggregation over `orders`.
    ///
    /// Pass all orders for global statistics, or one user's orders for
    /// personal statistics.
    #[must_use]
    pub fn summarize(orders: &[Order], current_week: WeekKey, now: DateTime<Utc>) -> Self {
        Self {
            total_orders: orders.len(),
            current_week_orders: orders.iter().filter(|o| o.week == current_week).count(),
            total_spend_cents: total_spend(orders),
            top_ingredients: top_ingredients(orders, TOP_N),
            top_combos: top_combos(orders, TOP_N),
            sizes: size_distribution(orders),
            breads: bread_distribution(orders),
            trend: weekly_trend(orders, now),
        }
    }
}

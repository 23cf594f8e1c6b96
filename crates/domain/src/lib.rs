// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calendar;
mod catalog;
mod closure;
mod combo;
mod error;
mod order;
mod special;
mod stats;
mod week;
mod window;

#[cfg(test)]
mod tests;

pub use calendar::{DEFAULT_TIMEZONE, OrderCalendar};
pub use catalog::{
    CatalogDraft, CatalogEntry, DEFAULT_CATEGORY, validate_catalog_draft,
    validate_catalog_name_unique,
};
pub use closure::{ClosureOverride, DEFAULT_CLOSURE_MESSAGE, validate_closure_message};
pub use combo::{Combo, SPECIAL_COMBO_NAME, combo_listing, preset_combos};
pub use error::DomainError;
pub use order::{
    Bread, MAX_INGREDIENTS, Order, OrderDraft, Price, Size, UserId, normalize_order_draft,
    validate_bread_size, validate_ingredients, validate_order_draft, validate_payment,
};
pub use special::{SpecialDraft, WeeklySpecial, normalize_special_draft, validate_special_draft};
pub use stats::{
    BreadCount, OrderStatistics, RankedCount, SizeCount, TOP_N, TREND_DAYS, UserSpend, WeekCount,
    bread_distribution, size_distribution, spend_by_user, top_combos, top_ingredients,
    total_spend, weekly_trend,
};
pub use week::WeekKey;
pub use window::{ClosedReason, OrderWindow, WindowClosed, WindowStatus};

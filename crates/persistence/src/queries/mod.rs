// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `orders` — Orders by week, owner and creation time
//! - `specials` — The weekly special
//! - `closure` — The closure override row
//! - `catalog` — Ingredient catalog listings
//! - `subscriptions` — Push destinations
//! - `audit` — Audit trail

pub mod audit;
pub mod catalog;
pub mod closure;
pub mod orders;
pub mod specials;
pub mod subscriptions;

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every transition from the core crate is written together with its
//! audit event inside a single transaction.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event persistence
//! - `orders` — Order inserts, updates and deletes
//! - `specials` — Weekly special writes
//! - `closure` — The closure override row
//! - `catalog` — Ingredient catalog writes
//! - `subscriptions` — Push destinations

pub mod audit;
pub mod catalog;
pub mod closure;
pub mod orders;
pub mod specials;
pub mod subscriptions;

pub use specials::SpecialWriteMode;

/// Result of persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The ID of the persisted audit event.
    pub event_id: i64,
    /// The inserted or updated record, `None` for deletes.
    pub record_id: Option<i64>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use bocadillo_audit::{AuditEvent, StateSnapshot};
use bocadillo_domain::{
    CatalogEntry, ClosureOverride, Order, OrderCalendar, UserId, WeekKey, WeeklySpecial,
};
use chrono::{DateTime, Utc};

/// The person a command is executed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// Stable identity used for ownership.
    pub user_id: UserId,
    /// Administrators may act on any order.
    pub is_admin: bool,
}

impl Requester {
    #[must_use]
    pub const fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Returns true if the requester may modify `order`.
    #[must_use]
    pub fn can_modify(&self, order: &Order) -> bool {
        self.is_admin || order.owner == self.user_id
    }
}

/// Everything a gated order operation needs to know about "now".
///
/// The context is built fresh for every request; nothing about the window
/// is cached between calls.
#[derive(Debug, Clone)]
pub struct OrderingContext<'a> {
    /// The timezone-bound window.
    pub calendar: &'a OrderCalendar,
    /// The closure override, or `None` if it could not be read.
    pub closure: Option<ClosureOverride>,
    /// The instant of the request.
    pub now: DateTime<Utc>,
}

impl<'a> OrderingContext<'a> {
    #[must_use]
    pub const fn new(
        calendar: &'a OrderCalendar,
        closure: Option<ClosureOverride>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            calendar,
            closure,
            now,
        }
    }

    /// The week of the request.
    #[must_use]
    pub fn current_week(&self) -> WeekKey {
        self.calendar.week_of(self.now)
    }

    /// Checks the override, then the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WindowClosed`] if ordering is not allowed.
    pub fn ensure_open(&self) -> Result<(), CoreError> {
        self.calendar
            .evaluate(self.closure.as_ref(), self.now)
            .map_err(CoreError::WindowClosed)
    }
}

/// A change to the order store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderChange {
    /// A new order to insert.
    Insert(Order),
    /// An existing order with new field values.
    Update(Order),
    /// An order to remove.
    Delete {
        /// The removed order.
        order_id: i64,
    },
}

/// The result of a successful order command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The change to apply.
    pub change: OrderChange,
    /// The audit event describing the change.
    pub audit_event: AuditEvent,
}

/// A change to the weekly special.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialChange {
    Insert(WeeklySpecial),
    Update(WeeklySpecial),
    Delete {
        /// The removed special.
        special_id: i64,
    },
}

/// The result of a successful special command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTransition {
    pub change: SpecialChange,
    pub audit_event: AuditEvent,
}

/// The result of a closure change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureTransition {
    pub new_state: ClosureOverride,
    pub audit_event: AuditEvent,
}

/// A change to the ingredient catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    Insert(CatalogEntry),
    Update(CatalogEntry),
    Delete {
        /// The removed entry.
        ingredient_id: i64,
    },
}

/// The result of a successful catalog command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTransition {
    pub change: CatalogChange,
    pub audit_event: AuditEvent,
}

/// Audit snapshot of an order.
#[must_use]
pub fn order_snapshot(order: &Order) -> StateSnapshot {
    StateSnapshot::new(format!(
        "order_id={},owner={},name={},size={},bread={},ingredients={},combo={},week={},price={},paid={}",
        order
            .order_id
            .map_or_else(|| String::from("new"), |id| id.to_string()),
        order.owner,
        order.display_name,
        order.size,
        order.bread,
        order.ingredients.join("|"),
        order.combo.as_deref().unwrap_or("-"),
        order.week,
        order
            .price
            .map_or_else(|| String::from("unset"), |p| p.to_string()),
        order.paid
    ))
}

/// Audit snapshot of a weekly special.
#[must_use]
pub fn special_snapshot(special: &WeeklySpecial) -> StateSnapshot {
    StateSnapshot::new(format!(
        "week={},size={},bread={},ingredients={}",
        special.week,
        special.size,
        special.bread,
        special.ingredients.join("|")
    ))
}

/// Audit snapshot of the closure override.
#[must_use]
pub fn closure_snapshot(closure: &ClosureOverride) -> StateSnapshot {
    StateSnapshot::new(format!(
        "manually_closed={},closed_by={},message={}",
        closure.manually_closed,
        closure.closed_by.as_deref().unwrap_or("-"),
        closure.closure_message
    ))
}

/// Audit snapshot of a catalog entry.
#[must_use]
pub fn catalog_snapshot(entry: &CatalogEntry) -> StateSnapshot {
    StateSnapshot::new(format!(
        "name={},category={},available={},sort_order={}",
        entry.name, entry.category, entry.available, entry.sort_order
    ))
}

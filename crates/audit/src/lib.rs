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

//! Audit trail types.
//!
//! Every state change produces exactly one [`AuditEvent`] describing who
//! made it, why, what was done, and the state before and after. Events are
//! immutable once created.

#[cfg(test)]
mod tests;

use bocadillo_domain::WeekKey;

/// Who performed an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Stable identity from the identity provider.
    pub id: String,
    /// The actor's role at the time of the action (e.g. "admin", "member").
    pub actor_type: String,
    /// Display name at the time of the action, if known.
    pub display_name: Option<String>,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self {
            id,
            actor_type,
            display_name: None,
        }
    }

    /// Creates an actor carrying a display name.
    #[must_use]
    pub const fn with_display_name(id: String, actor_type: String, display_name: String) -> Self {
        Self {
            id,
            actor_type,
            display_name: Some(display_name),
        }
    }
}

/// Why an action was performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A serialized view of state around an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot for "nothing existed".
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: String::from("none"),
        }
    }
}

/// An immutable record of one state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Storage identifier, `None` until persisted.
    pub event_id: Option<i64>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    /// The week the change belongs to. `None` for service-wide changes
    /// such as the closure override or the catalog.
    pub week: Option<WeekKey>,
}

impl AuditEvent {
    /// Creates an event scoped to a week.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        week: WeekKey,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            week: Some(week),
        }
    }

    /// Creates a service-wide event.
    #[must_use]
    pub const fn new_global(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            week: None,
        }
    }

    /// Reconstructs a persisted event.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        event_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        week: Option<WeekKey>,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            actor,
            cause,
            action,
            before,
            after,
            week,
        }
    }
}

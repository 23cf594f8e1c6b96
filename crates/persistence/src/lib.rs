// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the weekly order service.
//!
//! This crate stores orders, weekly specials, the closure override, the
//! ingredient catalog, push subscriptions and the audit trail. It is built
//! on Diesel over `SQLite`.
//!
//! ## Storage rules
//!
//! - Each core transition is written together with its audit event in one
//!   transaction.
//! - The one special per week rule is enforced by a `(week, year)` unique
//!   constraint, not by a read-then-write check.
//! - The closure override is a single row, created lazily in its open
//!   state the first time it is read.
//!
//! ## Testing Philosophy
//!
//! - Every test gets its own shared-cache in-memory database
//! - Migrations run on every connection, so tests exercise the real schema

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

use bocadillo::{CatalogTransition, ClosureTransition, SpecialTransition, TransitionResult};
use bocadillo_audit::AuditEvent;
use bocadillo_domain::{CatalogEntry, ClosureOverride, Order, UserId, WeekKey, WeeklySpecial};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod conversions;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{CatalogFilter, PushSubscriptionData};
pub use error::PersistenceError;
pub use mutations::{PersistTransitionResult, SpecialWriteMode};

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the order service.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Persists an order transition and its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the target row is missing or a write fails.
    pub fn persist_order_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::orders::persist_order_transition(&mut self.conn, result)
    }

    /// Retrieves an order by id, in any week.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the order does not exist.
    pub fn get_order(&mut self, order_id: i64) -> Result<Order, PersistenceError> {
        queries::orders::get_order(&mut self.conn, order_id)
    }

    /// Lists the orders of `week`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders_for_week(&mut self, week: WeekKey) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders_for_week(&mut self.conn, week)
    }

    /// Lists every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders(&mut self) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders(&mut self.conn)
    }

    /// Lists every order of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders_for_user(&mut self.conn, user_id)
    }

    /// Lists orders created at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders_since(
        &mut self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders_since(&mut self.conn, since)
    }

    /// The most recent order of `user_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest_order_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Option<Order>, PersistenceError> {
        queries::orders::latest_order_for_user(&mut self.conn, user_id)
    }

    /// Users with at least one order in `week`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn owners_with_orders(&mut self, week: WeekKey) -> Result<Vec<UserId>, PersistenceError> {
        queries::orders::owners_with_orders(&mut self.conn, week)
    }

    // ========================================================================
    // Weekly special
    // ========================================================================

    /// Persists a special transition and its audit event.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UniqueViolation`] if a create-only insert
    /// finds the week taken.
    pub fn persist_special_transition(
        &mut self,
        transition: &SpecialTransition,
        mode: SpecialWriteMode,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::specials::persist_special_transition(&mut self.conn, transition, mode)
    }

    /// The special of `week`, if one has been set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_weekly_special(
        &mut self,
        week: WeekKey,
    ) -> Result<Option<WeeklySpecial>, PersistenceError> {
        queries::specials::get_weekly_special(&mut self.conn, week)
    }

    // ========================================================================
    // Closure override
    // ========================================================================

    /// Reads the closure override, creating it open on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be read or created.
    pub fn get_closure_state(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<ClosureOverride, PersistenceError> {
        if let Some(state) = queries::closure::find_closure_state(&mut self.conn)? {
            return Ok(state);
        }
        mutations::closure::ensure_closure_row(&mut self.conn, now)?;
        Ok(queries::closure::find_closure_state(&mut self.conn)?.unwrap_or_default())
    }

    /// Persists a closure transition and its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn persist_closure_transition(
        &mut self,
        transition: &ClosureTransition,
        now: DateTime<Utc>,
    ) -> Result<i64, PersistenceError> {
        mutations::closure::persist_closure_transition(&mut self.conn, transition, now)
    }

    // ========================================================================
    // Ingredient catalog
    // ========================================================================

    /// Persists a catalog transition and its audit event.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UniqueViolation`] on a name clash.
    pub fn persist_catalog_transition(
        &mut self,
        transition: &CatalogTransition,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::catalog::persist_catalog_transition(&mut self.conn, transition)
    }

    /// Retrieves one catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the entry does not exist.
    pub fn get_catalog_entry(
        &mut self,
        ingredient_id: i64,
    ) -> Result<CatalogEntry, PersistenceError> {
        queries::catalog::get_catalog_entry(&mut self.conn, ingredient_id)
    }

    /// Lists catalog entries matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_catalog_entries(
        &mut self,
        filter: &CatalogFilter,
    ) -> Result<Vec<CatalogEntry>, PersistenceError> {
        queries::catalog::list_catalog_entries(&mut self.conn, filter)
    }

    /// Lists the distinct catalog categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_catalog_categories(&mut self) -> Result<Vec<String>, PersistenceError> {
        queries::catalog::list_catalog_categories(&mut self.conn)
    }

    // ========================================================================
    // Push subscriptions
    // ========================================================================

    /// Registers or refreshes a push destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_push_subscription(
        &mut self,
        user_id: &str,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, PersistenceError> {
        mutations::subscriptions::upsert_push_subscription(
            &mut self.conn,
            user_id,
            endpoint,
            p256dh,
            auth,
            now,
        )
    }

    /// Removes a destination of `user_id` by endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_push_subscription(
        &mut self,
        user_id: &str,
        endpoint: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::subscriptions::delete_push_subscription(&mut self.conn, user_id, endpoint)
    }

    /// Removes a destination by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_push_subscription_by_id(
        &mut self,
        subscription_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::subscriptions::delete_push_subscription_by_id(&mut self.conn, subscription_id)
    }

    /// Lists every push destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_push_subscriptions(
        &mut self,
    ) -> Result<Vec<PushSubscriptionData>, PersistenceError> {
        queries::subscriptions::list_push_subscriptions(&mut self.conn)
    }

    // ========================================================================
    // Audit trail
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// The most recent `limit` audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_recent_audit_events(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_recent_audit_events(&mut self.conn, limit)
    }
}

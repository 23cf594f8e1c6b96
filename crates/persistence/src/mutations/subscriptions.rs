// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Push subscription mutations.

use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::debug;

use crate::conversions::format_timestamp;
use crate::diesel_schema::push_subscriptions;
use crate::error::PersistenceError;

/// Stores a destination, refreshing the keys if `(user_id, endpoint)`
/// is already registered.
///
/// # Returns
///
/// The subscription id.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_push_subscription(
    conn: &mut SqliteConnection,
    user_id: &str,
    endpoint: &str,
    p256dh: &str,
    auth: &str,
    now: DateTime<Utc>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(push_subscriptions::table)
        .values((
            push_subscriptions::user_id.eq(user_id),
            push_subscriptions::endpoint.eq(endpoint),
            push_subscriptions::p256dh.eq(p256dh),
            push_subscriptions::auth.eq(auth),
            push_subscriptions::created_at.eq(format_timestamp(now)),
        ))
        .on_conflict((push_subscriptions::user_id, push_subscriptions::endpoint))
        .do_update()
        .set((
            push_subscriptions::p256dh.eq(excluded(push_subscriptions::p256dh)),
            push_subscriptions::auth.eq(excluded(push_subscriptions::auth)),
        ))
        .execute(conn)?;

    let subscription_id: i64 = push_subscriptions::table
        .filter(push_subscriptions::user_id.eq(user_id))
        .filter(push_subscriptions::endpoint.eq(endpoint))
        .select(push_subscriptions::subscription_id)
        .first::<i64>(conn)?;

    debug!(subscription_id, user_id, "Stored push subscription");
    Ok(subscription_id)
}

/// Removes the destination `endpoint` of `user_id`.
///
/// # Returns
///
/// The number of rows removed (0 or 1).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_push_subscription(
    conn: &mut SqliteConnection,
    user_id: &str,
    endpoint: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        push_subscriptions::table
            .filter(push_subscriptions::user_id.eq(user_id))
            .filter(push_subscriptions::endpoint.eq(endpoint)),
    )
    .execute(conn)?)
}

/// Removes a destination by id. Used to prune destinations reported gone.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_push_subscription_by_id(
    conn: &mut SqliteConnection,
    subscription_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        push_subscriptions::table.filter(push_subscriptions::subscription_id.eq(subscription_id)),
    )
    .execute(conn)?)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Push subscription queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::PushSubscriptionData;
use crate::diesel_schema::push_subscriptions;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = push_subscriptions)]
struct SubscriptionRow {
    subscription_id: i64,
    user_id: String,
    endpoint: String,
    p256dh: String,
    auth: String,
    created_at: String,
}

/// Lists every stored push destination.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_push_subscriptions(
    conn: &mut SqliteConnection,
) -> Result<Vec<PushSubscriptionData>, PersistenceError> {
    let rows: Vec<SubscriptionRow> = push_subscriptions::table
        .order(push_subscriptions::subscription_id.asc())
        .select(SubscriptionRow::as_select())
        .load::<SubscriptionRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| PushSubscriptionData {
            subscription_id: row.subscription_id,
            user_id: row.user_id,
            endpoint: row.endpoint,
            p256dh: row.p256dh,
            auth: row.auth,
            created_at: row.created_at,
        })
        .collect())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.

use bocadillo::{OrderChange, TransitionResult};
use bocadillo_domain::Order;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::conversions::{flag, format_timestamp, week_columns};
use crate::diesel_schema::orders;
use crate::error::PersistenceError;
use crate::mutations::PersistTransitionResult;
use crate::mutations::audit::persist_audit_event;

fn insert_order(conn: &mut SqliteConnection, order: &Order) -> Result<i64, PersistenceError> {
    let (week, year) = week_columns(order.week)?;
    diesel::insert_into(orders::table)
        .values((
            orders::owner_id.eq(order.owner.value()),
            orders::display_name.eq(&order.display_name),
            orders::size.eq(order.size.as_str()),
            orders::bread.eq(order.bread.as_str()),
            orders::ingredients_json.eq(serde_json::to_string(&order.ingredients)?),
            orders::combo.eq(order.combo.as_deref()),
            orders::week.eq(week),
            orders::year.eq(year),
            orders::created_at.eq(format_timestamp(order.created_at)),
            orders::price_cents.eq(order.price.map(|p| p.cents())),
            orders::paid.eq(flag(order.paid)),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

fn update_order(conn: &mut SqliteConnection, order: &Order) -> Result<i64, PersistenceError> {
    let order_id: i64 = order
        .order_id
        .ok_or_else(|| PersistenceError::NotFound(String::from("order without id")))?;

    let updated: usize = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
        .set((
            orders::display_name.eq(&order.display_name),
            orders::size.eq(order.size.as_str()),
            orders::bread.eq(order.bread.as_str()),
            orders::ingredients_json.eq(serde_json::to_string(&order.ingredients)?),
            orders::combo.eq(order.combo.as_deref()),
            orders::price_cents.eq(order.price.map(|p| p.cents())),
            orders::paid.eq(flag(order.paid)),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("order {order_id}")));
    }
    Ok(order_id)
}

fn delete_order(conn: &mut SqliteConnection, order_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(orders::table.filter(orders::order_id.eq(order_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("order {order_id}")));
    }
    Ok(())
}

/// Applies an order change and its audit event in one transaction.
///
/// # Errors
///
/// Returns an error if the target row is missing or a write fails. Nothing
/// is written in that case.
pub fn persist_order_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let record_id: Option<i64> = match &result.change {
            OrderChange::Insert(order) => Some(insert_order(conn, order)?),
            OrderChange::Update(order) => Some(update_order(conn, order)?),
            OrderChange::Delete { order_id } => {
                delete_order(conn, *order_id)?;
                None
            }
        };
        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        info!(
            event_id,
            ?record_id,
            action = %result.audit_event.action.name,
            "Persisted order transition"
        );
        Ok(PersistTransitionResult {
            event_id,
            record_id,
        })
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order queries.

use bocadillo_domain::{Order, UserId, WeekKey};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::conversions::{
    format_timestamp, from_flag, parse_bread, parse_price, parse_size, parse_timestamp,
    week_columns, week_from_columns,
};
use crate::diesel_schema::orders;
use crate::error::PersistenceError;

/// Diesel Queryable struct for order rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    owner_id: String,
    display_name: String,
    size: String,
    bread: String,
    ingredients_json: String,
    combo: Option<String>,
    week: i32,
    year: i32,
    created_at: String,
    price_cents: Option<i64>,
    paid: i32,
}

impl OrderRow {
    /// Rebuilds the domain order from its stored columns.
    fn into_order(self) -> Result<Order, PersistenceError> {
        let ingredients: Vec<String> = serde_json::from_str(&self.ingredients_json)?;
        Ok(Order {
            order_id: Some(self.order_id),
            owner: UserId::new(&self.owner_id),
            display_name: self.display_name,
            size: parse_size(&self.size)?,
            bread: parse_bread(&self.bread)?,
            ingredients,
            combo: self.combo,
            week: week_from_columns(self.week, self.year)?,
            created_at: parse_timestamp(&self.created_at)?,
            price: parse_price(self.price_cents)?,
            paid: from_flag(self.paid),
        })
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, PersistenceError> {
    rows.into_iter().map(OrderRow::into_order).collect()
}

/// Retrieves one order by id.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no such order exists.
pub fn get_order(conn: &mut SqliteConnection, order_id: i64) -> Result<Order, PersistenceError> {
    let row: Option<OrderRow> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first::<OrderRow>(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::NotFound(format!("order {order_id}")))?
        .into_order()
}

/// Lists the orders of one week, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_orders_for_week(
    conn: &mut SqliteConnection,
    week: WeekKey,
) -> Result<Vec<Order>, PersistenceError> {
    let (number, year) = week_columns(week)?;
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::week.eq(number))
        .filter(orders::year.eq(year))
        .order((orders::created_at.desc(), orders::order_id.desc()))
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;
    into_orders(rows)
}

/// Lists every stored order, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .order((orders::created_at.asc(), orders::order_id.asc()))
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;
    into_orders(rows)
}

/// Lists every order owned by `user_id`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_orders_for_user(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::owner_id.eq(user_id.value()))
        .order((orders::created_at.asc(), orders::order_id.asc()))
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;
    into_orders(rows)
}

/// Lists orders created at or after `since`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_orders_since(
    conn: &mut SqliteConnection,
    since: DateTime<Utc>,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::created_at.ge(format_timestamp(since)))
        .order((orders::created_at.asc(), orders::order_id.asc()))
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;
    into_orders(rows)
}

/// The most recently created order of `user_id`, in any week.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn latest_order_for_user(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Option<Order>, PersistenceError> {
    orders::table
        .filter(orders::owner_id.eq(user_id.value()))
        .order((orders::created_at.desc(), orders::order_id.desc()))
        .select(OrderRow::as_select())
        .first::<OrderRow>(conn)
        .optional()?
        .map(OrderRow::into_order)
        .transpose()
}

/// Distinct owners with at least one order in `week`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn owners_with_orders(
    conn: &mut SqliteConnection,
    week: WeekKey,
) -> Result<Vec<UserId>, PersistenceError> {
    let (number, year) = week_columns(week)?;
    let owners: Vec<String> = orders::table
        .filter(orders::week.eq(number))
        .filter(orders::year.eq(year))
        .select(orders::owner_id)
        .distinct()
        .order(orders::owner_id.asc())
        .load::<String>(conn)?;
    Ok(owners.iter().map(|owner| UserId::new(owner)).collect())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly special queries.

use bocadillo_domain::{WeekKey, WeeklySpecial};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::conversions::{
    parse_bread, parse_size, parse_timestamp, week_columns, week_from_columns,
};
use crate::diesel_schema::weekly_specials;
use crate::error::PersistenceError;

/// Diesel Queryable struct for weekly special rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = weekly_specials)]
struct SpecialRow {
    special_id: i64,
    size: String,
    bread: String,
    ingredients_json: String,
    week: i32,
    year: i32,
    created_at: String,
    updated_at: String,
}

impl SpecialRow {
    fn into_special(self) -> Result<WeeklySpecial, PersistenceError> {
        Ok(WeeklySpecial {
            special_id: Some(self.special_id),
            size: parse_size(&self.size)?,
            bread: parse_bread(&self.bread)?,
            ingredients: serde_json::from_str(&self.ingredients_json)?,
            week: week_from_columns(self.week, self.year)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Retrieves the special of `week`, if one has been set.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_weekly_special(
    conn: &mut SqliteConnection,
    week: WeekKey,
) -> Result<Option<WeeklySpecial>, PersistenceError> {
    let (number, year) = week_columns(week)?;
    weekly_specials::table
        .filter(weekly_specials::week.eq(number))
        .filter(weekly_specials::year.eq(year))
        .select(SpecialRow::as_select())
        .first::<SpecialRow>(conn)
        .optional()?
        .map(SpecialRow::into_special)
        .transpose()
}

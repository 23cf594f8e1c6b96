// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closure override queries.

use bocadillo_domain::ClosureOverride;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::conversions::{from_flag, parse_timestamp};
use crate::diesel_schema::closure_override;
use crate::error::PersistenceError;

/// Primary key of the single closure row.
pub const CLOSURE_ROW_ID: i64 = 1;

#[derive(Queryable, Selectable)]
#[diesel(table_name = closure_override)]
struct ClosureRow {
    manually_closed: i32,
    closure_message: String,
    closed_by: Option<String>,
    closed_at: Option<String>,
}

/// Reads the closure row, or `None` if it has never been written.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_closure_state(
    conn: &mut SqliteConnection,
) -> Result<Option<ClosureOverride>, PersistenceError> {
    let row: Option<ClosureRow> = closure_override::table
        .filter(closure_override::closure_id.eq(CLOSURE_ROW_ID))
        .select(ClosureRow::as_select())
        .first::<ClosureRow>(conn)
        .optional()?;

    row.map(|row| {
        Ok(ClosureOverride {
            manually_closed: from_flag(row.manually_closed),
            closure_message: row.closure_message,
            closed_by: row.closed_by,
            closed_at: row.closed_at.as_deref().map(parse_timestamp).transpose()?,
        })
    })
    .transpose()
}

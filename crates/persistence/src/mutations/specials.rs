// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly special mutations.
//!
//! The `(week, year)` unique constraint is the final arbiter of the one
//! special per week rule. Two concurrent creates for the same week cannot
//! both succeed.

use bocadillo::{SpecialChange, SpecialTransition};
use bocadillo_domain::WeeklySpecial;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::conversions::{format_timestamp, week_columns};
use crate::diesel_schema::weekly_specials;
use crate::error::PersistenceError;
use crate::mutations::PersistTransitionResult;
use crate::mutations::audit::persist_audit_event;

/// How an insert behaves when the week already has a special.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialWriteMode {
    /// Fall back to replacing the stored special in place.
    Upsert,
    /// Surface the clash as [`PersistenceError::UniqueViolation`].
    CreateOnly,
}

fn insert_special(
    conn: &mut SqliteConnection,
    special: &WeeklySpecial,
) -> Result<i64, PersistenceError> {
    let (week, year) = week_columns(special.week)?;
    diesel::insert_into(weekly_specials::table)
        .values((
            weekly_specials::size.eq(special.size.as_str()),
            weekly_specials::bread.eq(special.bread.as_str()),
            weekly_specials::ingredients_json.eq(serde_json::to_string(&special.ingredients)?),
            weekly_specials::week.eq(week),
            weekly_specials::year.eq(year),
            weekly_specials::created_at.eq(format_timestamp(special.created_at)),
            weekly_specials::updated_at.eq(format_timestamp(special.updated_at)),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Replaces the curated fields of the special stored for the same week.
fn replace_special(
    conn: &mut SqliteConnection,
    special: &WeeklySpecial,
) -> Result<i64, PersistenceError> {
    let (week, year) = week_columns(special.week)?;

    let updated: usize = diesel::update(
        weekly_specials::table
            .filter(weekly_specials::week.eq(week))
            .filter(weekly_specials::year.eq(year)),
    )
    .set((
        weekly_specials::size.eq(special.size.as_str()),
        weekly_specials::bread.eq(special.bread.as_str()),
        weekly_specials::ingredients_json.eq(serde_json::to_string(&special.ingredients)?),
        weekly_specials::updated_at.eq(format_timestamp(special.updated_at)),
    ))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("special for {}", special.week)));
    }

    Ok(weekly_specials::table
        .filter(weekly_specials::week.eq(week))
        .filter(weekly_specials::year.eq(year))
        .select(weekly_specials::special_id)
        .first::<i64>(conn)?)
}

/// Applies a special change and its audit event in one transaction.
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] when `mode` is
/// [`SpecialWriteMode::CreateOnly`] and the week already has a special, or
/// any other error if a write fails.
pub fn persist_special_transition(
    conn: &mut SqliteConnection,
    transition: &SpecialTransition,
    mode: SpecialWriteMode,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let record_id: Option<i64> = match &transition.change {
            SpecialChange::Insert(special) => match insert_special(conn, special) {
                Ok(id) => Some(id),
                Err(PersistenceError::UniqueViolation(_)) if mode == SpecialWriteMode::Upsert => {
                    info!(week = %special.week, "Special created concurrently, replacing it");
                    Some(replace_special(conn, special)?)
                }
                Err(err) => return Err(err),
            },
            SpecialChange::Update(special) => Some(replace_special(conn, special)?),
            SpecialChange::Delete { special_id } => {
                let deleted: usize = diesel::delete(
                    weekly_specials::table.filter(weekly_specials::special_id.eq(*special_id)),
                )
                .execute(conn)?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound(format!("special {special_id}")));
                }
                None
            }
        };
        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;

        info!(event_id, ?record_id, "Persisted special transition");
        Ok(PersistTransitionResult {
            event_id,
            record_id,
        })
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closure override mutations.

use bocadillo::ClosureTransition;
use bocadillo_domain::ClosureOverride;
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::conversions::{flag, format_timestamp};
use crate::diesel_schema::closure_override;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::closure::CLOSURE_ROW_ID;

/// Creates the closure row in its open default state unless it exists.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn ensure_closure_row(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    let default: ClosureOverride = ClosureOverride::default();
    let inserted: usize = diesel::insert_or_ignore_into(closure_override::table)
        .values((
            closure_override::closure_id.eq(CLOSURE_ROW_ID),
            closure_override::manually_closed.eq(flag(default.manually_closed)),
            closure_override::closure_message.eq(&default.closure_message),
            closure_override::updated_at.eq(format_timestamp(now)),
        ))
        .execute(conn)?;
    if inserted > 0 {
        info!("Created closure override record");
    }
    Ok(())
}

/// Stores the new closure state and its audit event in one transaction.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn persist_closure_transition(
    conn: &mut SqliteConnection,
    transition: &ClosureTransition,
    now: DateTime<Utc>,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_closure_row(conn, now)?;

        let state: &ClosureOverride = &transition.new_state;
        diesel::update(
            closure_override::table.filter(closure_override::closure_id.eq(CLOSURE_ROW_ID)),
        )
        .set((
            closure_override::manually_closed.eq(flag(state.manually_closed)),
            closure_override::closure_message.eq(&state.closure_message),
            closure_override::closed_by.eq(state.closed_by.as_deref()),
            closure_override::closed_at.eq(state.closed_at.map(format_timestamp)),
            closure_override::updated_at.eq(format_timestamp(now)),
        ))
        .execute(conn)?;

        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;
        info!(
            event_id,
            manually_closed = state.manually_closed,
            "Persisted closure transition"
        );
        Ok(event_id)
    })
}

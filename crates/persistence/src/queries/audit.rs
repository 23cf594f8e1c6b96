// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use bocadillo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use bocadillo_domain::WeekKey;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::conversions::week_from_columns;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    week: Option<i32>,
    year: Option<i32>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

fn row_to_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let actor: Actor = match actor_data.display_name {
        Some(display_name) => {
            Actor::with_display_name(actor_data.id, actor_data.actor_type, display_name)
        }
        None => Actor::new(actor_data.id, actor_data.actor_type),
    };

    let week: Option<WeekKey> = match (row.week, row.year) {
        (Some(week), Some(year)) => Some(week_from_columns(week, year)?),
        _ => None,
    };

    Ok(AuditEvent::with_id(
        row.event_id,
        actor,
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        week,
    ))
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;
    row_to_event(row)
}

/// The most recent `limit` audit events, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn list_recent_audit_events(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;
    rows.into_iter().map(row_to_event).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingredient catalog mutations.

use bocadillo::{CatalogChange, CatalogTransition};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::conversions::flag;
use crate::diesel_schema::ingredients;
use crate::error::PersistenceError;
use crate::mutations::PersistTransitionResult;
use crate::mutations::audit::persist_audit_event;

/// Applies a catalog change and its audit event in one transaction.
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] if the name clashes with
/// another entry, [`PersistenceError::NotFound`] if the target is gone, or
/// any other error if a write fails.
pub fn persist_catalog_transition(
    conn: &mut SqliteConnection,
    transition: &CatalogTransition,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let record_id: Option<i64> = match &transition.change {
            CatalogChange::Insert(entry) => {
                diesel::insert_into(ingredients::table)
                    .values((
                        ingredients::name.eq(&entry.name),
                        ingredients::category.eq(&entry.category),
                        ingredients::available.eq(flag(entry.available)),
                        ingredients::sort_order.eq(entry.sort_order),
                    ))
                    .execute(conn)?;
                Some(conn.get_last_insert_rowid()?)
            }
            CatalogChange::Update(entry) => {
                let ingredient_id: i64 = entry.ingredient_id.ok_or_else(|| {
                    PersistenceError::NotFound(String::from("ingredient without id"))
                })?;
                let updated: usize = diesel::update(
                    ingredients::table.filter(ingredients::ingredient_id.eq(ingredient_id)),
                )
                .set((
                    ingredients::name.eq(&entry.name),
                    ingredients::category.eq(&entry.category),
                    ingredients::available.eq(flag(entry.available)),
                    ingredients::sort_order.eq(entry.sort_order),
                ))
                .execute(conn)?;
                if updated == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "ingredient {ingredient_id}"
                    )));
                }
                Some(ingredient_id)
            }
            CatalogChange::Delete { ingredient_id } => {
                let deleted: usize = diesel::delete(
                    ingredients::table.filter(ingredients::ingredient_id.eq(*ingredient_id)),
                )
                .execute(conn)?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "ingredient {ingredient_id}"
                    )));
                }
                None
            }
        };
        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;

        info!(event_id, ?record_id, "Persisted catalog transition");
        Ok(PersistTransitionResult {
            event_id,
            record_id,
        })
    })
}

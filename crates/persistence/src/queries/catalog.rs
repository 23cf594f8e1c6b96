// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingredient catalog queries.

use bocadillo_domain::CatalogEntry;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::conversions::from_flag;
use crate::data_models::CatalogFilter;
use crate::diesel_schema::ingredients;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = ingredients)]
struct IngredientRow {
    ingredient_id: i64,
    name: String,
    category: String,
    available: i32,
    sort_order: i32,
}

impl From<IngredientRow> for CatalogEntry {
    fn from(row: IngredientRow) -> Self {
        Self {
            ingredient_id: Some(row.ingredient_id),
            name: row.name,
            category: row.category,
            available: from_flag(row.available),
            sort_order: row.sort_order,
        }
    }
}

/// Retrieves one catalog entry.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the entry does not exist.
pub fn get_catalog_entry(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> Result<CatalogEntry, PersistenceError> {
    ingredients::table
        .filter(ingredients::ingredient_id.eq(ingredient_id))
        .select(IngredientRow::as_select())
        .first::<IngredientRow>(conn)
        .optional()?
        .map(CatalogEntry::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("ingredient {ingredient_id}")))
}

/// Lists catalog entries by category, then sort order, then name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_catalog_entries(
    conn: &mut SqliteConnection,
    filter: &CatalogFilter,
) -> Result<Vec<CatalogEntry>, PersistenceError> {
    let mut query = ingredients::table
        .select(IngredientRow::as_select())
        .order((
            ingredients::category.asc(),
            ingredients::sort_order.asc(),
            ingredients::name.asc(),
        ))
        .into_boxed();

    if let Some(category) = &filter.category {
        query = query.filter(ingredients::category.eq(category.clone()));
    }
    if filter.available_only {
        query = query.filter(ingredients::available.eq(1));
    }

    let rows: Vec<IngredientRow> = query.load::<IngredientRow>(conn)?;
    Ok(rows.into_iter().map(CatalogEntry::from).collect())
}

/// Distinct categories in ascending order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_catalog_categories(
    conn: &mut SqliteConnection,
) -> Result<Vec<String>, PersistenceError> {
    Ok(ingredients::table
        .select(ingredients::category)
        .distinct()
        .order(ingredients::category.asc())
        .load::<String>(conn)?)
}

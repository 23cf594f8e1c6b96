// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shared ingredient catalog.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "General";
/// Maximum length of a catalog name, in characters.
pub const MAX_CATALOG_NAME_LENGTH: usize = 100;
/// Maximum length of a category, in characters.
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// Fields of a catalog entry supplied by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDraft {
    pub name: String,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub sort_order: Option<i32>,
}

/// One ingredient on the shared menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Storage identifier, `None` until persisted.
    pub ingredient_id: Option<i64>,
    pub name: String,
    pub category: String,
    pub available: bool,
    pub sort_order: i32,
}

impl CatalogEntry {
    /// Creates an entry from a draft, applying defaults.
    #[must_use]
    pub fn from_draft(draft: CatalogDraft) -> Self {
        Self {
            ingredient_id: None,
            name: draft.name.trim().to_string(),
            category: draft
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            available: draft.available.unwrap_or(true),
            sort_order: draft.sort_order.unwrap_or(0),
        }
    }

    /// Applies a partial update: absent optional fields keep their values.
    #[must_use]
    pub fn updated(&self, draft: CatalogDraft) -> Self {
        Self {
            ingredient_id: self.ingredient_id,
            name: draft.name.trim().to_string(),
            category: draft
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| self.category.clone()),
            available: draft.available.unwrap_or(self.available),
            sort_order: draft.sort_order.unwrap_or(self.sort_order),
        }
    }
}

/// Validates catalog entry fields.
///
/// # Errors
///
/// Returns an error if the name is blank or too long, or the category is
/// too long.
pub fn validate_catalog_draft(draft: &CatalogDraft) -> Result<(), DomainError> {
    let name: &str = draft.name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidCatalogName(String::from(
            "Name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_CATALOG_NAME_LENGTH {
        return Err(DomainError::InvalidCatalogName(format!(
            "Name cannot exceed {MAX_CATALOG_NAME_LENGTH} characters"
        )));
    }
    if let Some(category) = &draft.category
        && category.trim().chars().count() > MAX_CATEGORY_LENGTH
    {
        return Err(DomainError::InvalidCategory(format!(
            "Category cannot exceed {MAX_CATEGORY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates that `name` is unique among `existing`, ignoring case.
///
/// `exclude_id` skips the entry being updated.
///
/// # Errors
///
/// Returns [`DomainError::DuplicateCatalogName`] on a clash.
pub fn validate_catalog_name_unique(
    name: &str,
    existing: &[CatalogEntry],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let wanted: String = name.trim().to_lowercase();
    let clash: bool = existing
        .iter()
        .filter(|entry| exclude_id.is_none() || entry.ingredient_id != exclude_id)
        .any(|entry| entry.name.to_lowercase() == wanted);

    if clash {
        return Err(DomainError::DuplicateCatalogName(name.trim().to_string()));
    }
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The weekly special ("Alquimista").
//!
//! At most one special exists per [`WeekKey`]. The storage layer enforces
//! this with a unique constraint on `(week, year)`.

use crate::error::DomainError;
use crate::order::{Bread, Size, validate_bread_size, validate_ingredients};
use crate::week::WeekKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The admin-curated fields of a weekly special.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDraft {
    pub size: Size,
    pub bread: Bread,
    pub ingredients: Vec<String>,
}

/// The special for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySpecial {
    /// Storage identifier, `None` until persisted.
    pub special_id: Option<i64>,
    pub size: Size,
    pub bread: Bread,
    pub ingredients: Vec<String>,
    pub week: WeekKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklySpecial {
    /// Creates a special for `week` from a validated draft.
    #[must_use]
    pub fn new(draft: SpecialDraft, week: WeekKey, now: DateTime<Utc>) -> Self {
        Self {
            special_id: None,
            size: draft.size,
            bread: draft.bread,
            ingredients: draft.ingredients,
            week,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with the curated fields replaced in place.
    #[must_use]
    pub fn replaced(&self, draft: SpecialDraft, now: DateTime<Utc>) -> Self {
        Self {
            size: draft.size,
            bread: draft.bread,
            ingredients: draft.ingredients,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Validates a special draft with the same menu rules as orders.
///
/// # Errors
///
/// Returns an error if the ingredient list is invalid or the bread is not
/// offered in the requested size.
pub fn validate_special_draft(draft: &SpecialDraft) -> Result<(), DomainError> {
    validate_ingredients(&draft.ingredients)?;
    validate_bread_size(draft.bread, draft.size)
}

/// Returns the draft with trimmed ingredient entries.
#[must_use]
pub fn normalize_special_draft(draft: SpecialDraft) -> SpecialDraft {
    SpecialDraft {
        ingredients: draft
            .ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .collect(),
        ..draft
    }
}

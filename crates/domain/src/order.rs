// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orders and their validation rules.

use crate::error::DomainError;
use crate::week::WeekKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of ingredients in one order.
pub const MAX_INGREDIENTS: usize = 10;
/// Maximum length of a display name, in characters.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;
/// Maximum length of one ingredient entry, in characters.
pub const MAX_INGREDIENT_LENGTH: usize = 100;
/// Maximum length of a combo reference, in characters.
pub const MAX_COMBO_NAME_LENGTH: usize = 50;

/// Sandwich size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    Normal,
    Large,
}

impl Size {
    /// All sizes in declaration order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Large];

    /// Returns the canonical wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "LARGE" => Ok(Self::Large),
            _ => Err(DomainError::InvalidSize(s.to_string())),
        }
    }
}

/// Bread type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bread {
    Normal,
    Wholegrain,
    Seeded,
}

impl Bread {
    /// All bread types in declaration order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Wholegrain, Self::Seeded];

    /// Returns the canonical wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Wholegrain => "WHOLEGRAIN",
            Self::Seeded => "SEEDED",
        }
    }

    /// Returns true if this bread is offered in `size`.
    ///
    /// Wholegrain and seeded loaves only come in the normal size.
    #[must_use]
    pub const fn allows(&self, size: Size) -> bool {
        matches!((self, size), (Self::Normal, _) | (_, Size::Normal))
    }
}

impl std::fmt::Display for Bread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Bread {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "WHOLEGRAIN" => Ok(Self::Wholegrain),
            "SEEDED" => Ok(Self::Seeded),
            _ => Err(DomainError::InvalidBread(s.to_string())),
        }
    }
}

/// A non-negative price in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// # Errors
    ///
    /// Returns an error if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self, DomainError> {
        if cents < 0 {
            return Err(DomainError::InvalidPrice(format!(
                "Price cannot be negative (got {cents} cents)"
            )));
        }
        Ok(Self(cents))
    }

    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Stable identity of the person who owns an order.
///
/// Supplied by the identity provider and never derived from display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable fields of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Display name printed on the order.
    pub display_name: String,
    /// Requested size.
    pub size: Size,
    /// Requested bread.
    pub bread: Bread,
    /// Ingredients in the order given.
    pub ingredients: Vec<String>,
    /// Optional predefined combo the order is based on.
    pub combo: Option<String>,
}

/// One person's order for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Storage identifier, `None` until persisted.
    pub order_id: Option<i64>,
    /// The owner's stable identity.
    pub owner: UserId,
    /// Display name, uppercase.
    pub display_name: String,
    pub size: Size,
    pub bread: Bread,
    pub ingredients: Vec<String>,
    pub combo: Option<String>,
    /// The week the order was placed in. Never changes after creation.
    pub week: WeekKey,
    pub created_at: DateTime<Utc>,
    /// Assigned by an administrator.
    pub price: Option<Price>,
    pub paid: bool,
}

impl Order {
    /// Creates a new unpriced, unpaid order from a normalized draft.
    #[must_use]
    pub fn new(owner: UserId, draft: OrderDraft, week: WeekKey, created_at: DateTime<Utc>) -> Self {
        Self {
            order_id: None,
            owner,
            display_name: draft.display_name,
            size: draft.size,
            bread: draft.bread,
            ingredients: draft.ingredients,
            combo: draft.combo,
            week,
            created_at,
            price: None,
            paid: false,
        }
    }

    /// Returns a copy with the editable fields replaced by `draft`.
    ///
    /// Owner, week, creation time, price and paid status are preserved.
    #[must_use]
    pub fn revised(&self, draft: OrderDraft) -> Self {
        Self {
            display_name: draft.display_name,
            size: draft.size,
            bread: draft.bread,
            ingredients: draft.ingredients,
            combo: draft.combo,
            ..self.clone()
        }
    }

    /// Price in cents, with an unset price counted as zero.
    #[must_use]
    pub fn price_cents_or_zero(&self) -> i64 {
        self.price.map_or(0, |p| p.cents())
    }
}

/// Validates an ingredient list.
///
/// # Errors
///
/// Returns an error if the list is empty, longer than [`MAX_INGREDIENTS`],
/// or contains a blank, oversized or repeated entry.
pub fn validate_ingredients(ingredients: &[String]) -> Result<(), DomainError> {
    if ingredients.is_empty() {
        return Err(DomainError::EmptyIngredients);
    }
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(DomainError::TooManyIngredients {
            count: ingredients.len(),
            max: MAX_INGREDIENTS,
        });
    }

    let mut seen: HashSet<String> = HashSet::new();
    for ingredient in ingredients {
        let trimmed: &str = ingredient.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIngredient(String::from(
                "Ingredient cannot be blank",
            )));
        }
        if trimmed.chars().count() > MAX_INGREDIENT_LENGTH {
            return Err(DomainError::InvalidIngredient(format!(
                "'{trimmed}' exceeds {MAX_INGREDIENT_LENGTH} characters"
            )));
        }
        if !seen.insert(trimmed.to_lowercase()) {
            return Err(DomainError::DuplicateIngredient(trimmed.to_string()));
        }
    }

    Ok(())
}

/// Validates that a bread type is offered in a size.
///
/// # Errors
///
/// Returns [`DomainError::BreadSizeConflict`] for wholegrain or seeded bread
/// in the large size.
pub const fn validate_bread_size(bread: Bread, size: Size) -> Result<(), DomainError> {
    if bread.allows(size) {
        Ok(())
    } else {
        Err(DomainError::BreadSizeConflict { bread, size })
    }
}

/// Validates every order draft rule.
///
/// # Errors
///
/// Returns the first rule the draft violates.
pub fn validate_order_draft(draft: &OrderDraft) -> Result<(), DomainError> {
    let name: &str = draft.display_name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }

    validate_ingredients(&draft.ingredients)?;
    validate_bread_size(draft.bread, draft.size)?;

    if let Some(combo) = &draft.combo {
        let combo: &str = combo.trim();
        if combo.is_empty() {
            return Err(DomainError::InvalidComboName(String::from(
                "Combo name cannot be blank",
            )));
        }
        if combo.chars().count() > MAX_COMBO_NAME_LENGTH {
            return Err(DomainError::InvalidComboName(format!(
                "Combo name cannot exceed {MAX_COMBO_NAME_LENGTH} characters"
            )));
        }
    }

    Ok(())
}

/// Returns the draft in stored form: trimmed fields and an uppercase name.
#[must_use]
pub fn normalize_order_draft(draft: OrderDraft) -> OrderDraft {
    OrderDraft {
        display_name: draft.display_name.trim().to_uppercase(),
        size: draft.size,
        bread: draft.bread,
        ingredients: draft
            .ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .collect(),
        combo: draft.combo.map(|c| c.trim().to_string()),
    }
}

/// Validates the payment fields of an order.
///
/// # Errors
///
/// Returns [`DomainError::PaidWithoutPrice`] if `paid` is set without a price.
pub const fn validate_payment(price: Option<Price>, paid: bool) -> Result<(), DomainError> {
    if paid && price.is_none() {
        return Err(DomainError::PaidWithoutPrice);
    }
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::order::{Bread, Size};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The ingredient list is empty.
    EmptyIngredients,
    /// The ingredient list exceeds the allowed maximum.
    TooManyIngredients {
        /// The number of ingredients supplied.
        count: usize,
        /// The maximum allowed.
        max: usize,
    },
    /// An ingredient entry is blank or too long.
    InvalidIngredient(String),
    /// The same ingredient appears more than once.
    DuplicateIngredient(String),
    /// The bread type is not offered in the requested size.
    BreadSizeConflict {
        /// The requested bread.
        bread: Bread,
        /// The requested size.
        size: Size,
    },
    /// Display name is empty or too long.
    InvalidName(String),
    /// Combo reference is empty or too long.
    InvalidComboName(String),
    /// Size string could not be parsed.
    InvalidSize(String),
    /// Bread string could not be parsed.
    InvalidBread(String),
    /// Price is negative or otherwise unusable.
    InvalidPrice(String),
    /// An order cannot be marked paid without a price.
    PaidWithoutPrice,
    /// The week/year pair is not a valid ISO week.
    InvalidWeek {
        /// The week number.
        week: u32,
        /// The ISO year.
        year: i32,
    },
    /// Closure message is empty or too long.
    InvalidClosureMessage(String),
    /// The weekly window configuration is unusable.
    InvalidSchedule(String),
    /// Catalog ingredient name is empty or too long.
    InvalidCatalogName(String),
    /// Catalog category is too long.
    InvalidCategory(String),
    /// A catalog ingredient with the same name already exists.
    DuplicateCatalogName(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIngredients => write!(f, "At least one ingredient is required"),
            Self::TooManyIngredients { count, max } => {
                write!(f, "Too many ingredients: {count}. At most {max} are allowed")
            }
            Self::InvalidIngredient(msg) => write!(f, "Invalid ingredient: {msg}"),
            Self::DuplicateIngredient(name) => {
                write!(f, "Ingredient '{name}' appears more than once")
            }
            Self::BreadSizeConflict { bread, size } => {
                write!(f, "{bread} bread is not available in {size} size")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidComboName(msg) => write!(f, "Invalid combo name: {msg}"),
            Self::InvalidSize(value) => {
                write!(f, "Invalid size: '{value}'. Must be NORMAL or LARGE")
            }
            Self::InvalidBread(value) => write!(
                f,
                "Invalid bread: '{value}'. Must be NORMAL, WHOLEGRAIN or SEEDED"
            ),
            Self::InvalidPrice(msg) => write!(f, "Invalid price: {msg}"),
            Self::PaidWithoutPrice => {
                write!(f, "An order cannot be marked paid before a price is set")
            }
            Self::InvalidWeek { week, year } => {
                write!(f, "Week {week} of {year} is not a valid ISO week")
            }
            Self::InvalidClosureMessage(msg) => write!(f, "Invalid closure message: {msg}"),
            Self::InvalidSchedule(msg) => write!(f, "Invalid order window: {msg}"),
            Self::InvalidCatalogName(msg) => write!(f, "Invalid ingredient name: {msg}"),
            Self::InvalidCategory(msg) => write!(f, "Invalid category: {msg}"),
            Self::DuplicateCatalogName(name) => {
                write!(f, "An ingredient named '{name}' already exists")
            }
        }
    }
}

impl std::error::Error for DomainError {}

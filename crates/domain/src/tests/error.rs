// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Bread, DomainError, Size};

#[test]
fn test_bread_size_conflict_message_names_both_values() {
    let err: DomainError = DomainError::BreadSizeConflict {
        bread: Bread::Wholegrain,
        size: Size::Large,
    };
    assert_eq!(
        err.to_string(),
        "WHOLEGRAIN bread is not available in LARGE size"
    );
}

#[test]
fn test_too_many_ingredients_message() {
    let err: DomainError = DomainError::TooManyIngredients { count: 12, max: 10 };
    assert_eq!(
        err.to_string(),
        "Too many ingredients: 12. At most 10 are allowed"
    );
}

#[test]
fn test_invalid_week_message() {
    let err: DomainError = DomainError::InvalidWeek {
        week: 54,
        year: 2025,
    };
    assert_eq!(err.to_string(), "Week 54 of 2025 is not a valid ISO week");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::PaidWithoutPrice);
    assert!(err.to_string().contains("paid"));
}

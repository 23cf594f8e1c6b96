// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::money::PriceInputError;
use bocadillo::CoreError;
use bocadillo_domain::{ClosedReason, DomainError, OrderCalendar, WindowClosed};
use bocadillo_persistence::PersistenceError;
use chrono::NaiveDateTime;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every order mutation failure maps to exactly one variant, so callers can
/// tell a validation failure from a closed window, a permission problem or
/// a missing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have the required role.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor has the right role but may not touch this record.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why it was refused.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The ordering window is closed.
    WindowClosed {
        /// `manual` or `schedule`.
        reason: String,
        /// A human-readable description.
        message: String,
        /// RFC 3339 timestamp of the next opening, for schedule closures.
        next_opening: Option<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The write clashes with an existing record.
    Conflict {
        /// The type of resource in conflict.
        resource_type: String,
        /// A human-readable description of the clash.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden: cannot {action}: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::WindowClosed { message, .. } => write!(f, "{message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PriceInputError> for ApiError {
    fn from(err: PriceInputError) -> Self {
        Self::InvalidInput {
            field: String::from("price"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::EmptyIngredients
        | DomainError::TooManyIngredients { .. }
        | DomainError::InvalidIngredient(_)
        | DomainError::DuplicateIngredient(_) => ApiError::InvalidInput {
            field: String::from("ingredients"),
            message,
        },
        DomainError::BreadSizeConflict { .. } => ApiError::DomainRuleViolation {
            rule: String::from("bread_size"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("display_name"),
            message,
        },
        DomainError::InvalidComboName(_) => ApiError::InvalidInput {
            field: String::from("combo"),
            message,
        },
        DomainError::InvalidSize(_) => ApiError::InvalidInput {
            field: String::from("size"),
            message,
        },
        DomainError::InvalidBread(_) => ApiError::InvalidInput {
            field: String::from("bread"),
            message,
        },
        DomainError::InvalidPrice(_) => ApiError::InvalidInput {
            field: String::from("price"),
            message,
        },
        DomainError::PaidWithoutPrice => ApiError::DomainRuleViolation {
            rule: String::from("paid_requires_price"),
            message,
        },
        DomainError::InvalidWeek { .. } => ApiError::InvalidInput {
            field: String::from("week"),
            message,
        },
        DomainError::InvalidClosureMessage(_) => ApiError::InvalidInput {
            field: String::from("message"),
            message,
        },
        DomainError::InvalidSchedule(_) => ApiError::Internal { message },
        DomainError::InvalidCatalogName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidCategory(_) => ApiError::InvalidInput {
            field: String::from("category"),
            message,
        },
        DomainError::DuplicateCatalogName(_) => ApiError::Conflict {
            resource_type: String::from("Ingredient"),
            message,
        },
    }
}

/// Renders a local wall-clock time in RFC 3339 with the calendar's offset.
///
/// Without a calendar, or for a time skipped by a DST jump, the offset is
/// omitted.
#[must_use]
pub fn format_local(at: NaiveDateTime, calendar: Option<&OrderCalendar>) -> String {
    calendar
        .and_then(|c| c.to_zoned(at))
        .map_or_else(
            || at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            |zoned| zoned.to_rfc3339(),
        )
}

fn translate_window_closed(closed: &WindowClosed, calendar: Option<&OrderCalendar>) -> ApiError {
    let reason: &str = match closed.reason {
        ClosedReason::Manual { .. } => "manual",
        ClosedReason::Schedule => "schedule",
    };
    ApiError::WindowClosed {
        reason: reason.to_string(),
        message: closed.to_string(),
        next_opening: closed.next_opening.map(|at| format_local(at, calendar)),
    }
}

/// Translates a core error into an API error.
///
/// A closed window reports its next opening as local wall-clock time; use
/// [`translate_gated_error`] to attach the configured offset.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::WindowClosed(closed) => translate_window_closed(&closed, None),
        CoreError::PermissionDenied { action, reason } => ApiError::Forbidden { action, reason },
        CoreError::NotFound { resource, message } => ApiError::ResourceNotFound {
            resource_type: resource,
            message,
        },
        CoreError::Conflict { resource, message } => ApiError::Conflict {
            resource_type: resource,
            message,
        },
    }
}

/// Translates a core error from a window-gated operation.
///
/// Identical to [`translate_core_error`] except that the next opening is
/// rendered in RFC 3339 with the calendar's timezone offset.
#[must_use]
pub fn translate_gated_error(err: CoreError, calendar: &OrderCalendar) -> ApiError {
    match err {
        CoreError::WindowClosed(closed) => translate_window_closed(&closed, Some(calendar)),
        other => translate_core_error(other),
    }
}

/// Translates a persistence error into an API error.
///
/// Uniqueness violations become conflicts and missing rows become
/// not-found; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(message) => ApiError::Conflict {
            resource_type: resource_type.to_string(),
            message,
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

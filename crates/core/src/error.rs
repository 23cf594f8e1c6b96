// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bocadillo_domain::{DomainError, WindowClosed};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The ordering window does not allow the operation.
    WindowClosed(WindowClosed),
    /// The requester may not act on this record.
    PermissionDenied {
        /// The attempted action.
        action: String,
        /// Why it was refused.
        reason: String,
    },
    /// The target does not exist, or is outside the current week.
    NotFound {
        /// The kind of record.
        resource: String,
        /// What was looked up.
        message: String,
    },
    /// The operation would violate a uniqueness rule.
    Conflict {
        /// The kind of record.
        resource: String,
        /// Description of the clash.
        message: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::WindowClosed(closed) => write!(f, "{closed}"),
            Self::PermissionDenied { action, reason } => {
                write!(f, "Not allowed to {action}: {reason}")
            }
            Self::NotFound { resource, message } => write!(f, "{resource} not found: {message}"),
            Self::Conflict { resource, message } => write!(f, "{resource} conflict: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<WindowClosed> for CoreError {
    fn from(err: WindowClosed) -> Self {
        Self::WindowClosed(err)
    }
}

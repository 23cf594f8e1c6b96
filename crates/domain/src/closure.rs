// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manual closure override.
//!
//! A single process-wide record that lets an administrator force the
//! ordering window closed regardless of the time-based schedule.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message shown while the service is manually closed, unless replaced.
pub const DEFAULT_CLOSURE_MESSAGE: &str =
    "El servicio de bocadillos está cerrado esta semana. Vuelve a probar la próxima semana.";

/// Maximum length of a closure message, in characters.
pub const MAX_CLOSURE_MESSAGE_LENGTH: usize = 500;

/// The manual closure override.
///
/// `closed_by` and `closed_at` are present if and only if
/// `manually_closed` is true. Construct values through
/// [`ClosureOverride::with_state`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureOverride {
    /// Whether ordering is forced closed.
    pub manually_closed: bool,
    /// The message returned to callers while closed.
    pub closure_message: String,
    /// The administrator who closed the service.
    pub closed_by: Option<String>,
    /// When the service was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Default for ClosureOverride {
    fn default() -> Self {
        Self {
            manually_closed: false,
            closure_message: DEFAULT_CLOSURE_MESSAGE.to_string(),
            closed_by: None,
            closed_at: None,
        }
    }
}

impl ClosureOverride {
    /// Produces the next override state.
    ///
    /// Closing stamps `closed_by`/`closed_at`. Closing an already closed
    /// service keeps the original stamp. Opening clears both. A `None`
    /// message keeps the current one.
    #[must_use]
    pub fn with_state(
        &self,
        closed: bool,
        message: Option<String>,
        admin_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let closure_message: String = message.unwrap_or_else(|| self.closure_message.clone());

        if !closed {
            return Self {
                manually_closed: false,
                closure_message,
                closed_by: None,
                closed_at: None,
            };
        }

        let (closed_by, closed_at) = match (&self.closed_by, self.closed_at) {
            (Some(by), Some(at)) if self.manually_closed => (by.clone(), at),
            _ => (admin_id.to_string(), now),
        };

        Self {
            manually_closed: true,
            closure_message,
            closed_by: Some(closed_by),
            closed_at: Some(closed_at),
        }
    }

    /// Returns true if the stamp fields agree with the closed flag.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.manually_closed == self.closed_by.is_some()
            && self.manually_closed == self.closed_at.is_some()
    }
}

/// Validates and normalizes a closure message.
///
/// Returns the trimmed message.
///
/// # Errors
///
/// Returns an error if the trimmed message is empty or longer than
/// [`MAX_CLOSURE_MESSAGE_LENGTH`] characters.
pub fn validate_closure_message(message: &str) -> Result<String, DomainError> {
    let trimmed: &str = message.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidClosureMessage(String::from(
            "Message cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_CLOSURE_MESSAGE_LENGTH {
        return Err(DomainError::InvalidClosureMessage(format!(
            "Message cannot exceed {MAX_CLOSURE_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

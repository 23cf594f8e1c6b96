// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and role checks.
//!
//! Identity is issued by an external collaborator and trusted as-is. This
//! module only turns the supplied fields into an [`AuthenticatedActor`] and
//! decides which roles may run which operations. Ownership of individual
//! orders is checked by the core crate, not here.

use crate::error::AuthError;
use bocadillo::Requester;
use bocadillo_audit::Actor;
use bocadillo_domain::UserId;

/// Maximum length of a user id supplied by the identity collaborator.
const MAX_USER_ID_LENGTH: usize = 128;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Manages prices, payments, the weekly special, the closure override
    /// and the ingredient catalog. May act on any order.
    Admin,
    /// Places and manages their own orders.
    Member,
}

impl Role {
    /// The role name as stored in audit records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" | "user" => Ok(Self::Member),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// An authenticated person with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Stable identity used for ownership.
    pub user_id: String,
    /// Display name supplied with the identity, if any.
    pub display_name: Option<String>,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: String, display_name: Option<String>, role: Role) -> Self {
        Self {
            user_id,
            display_name,
            role,
        }
    }

    /// Returns true for administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = self.role.as_str().to_string();
        match &self.display_name {
            Some(name) => Actor::with_display_name(self.user_id.clone(), actor_type, name.clone()),
            None => Actor::new(self.user_id.clone(), actor_type),
        }
    }

    /// Converts this actor into the core requester used for ownership.
    #[must_use]
    pub fn to_requester(&self) -> Requester {
        Requester::new(UserId::new(&self.user_id), self.is_admin())
    }
}

/// Turns collaborator-supplied identity fields into an actor.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates the identity supplied with a request.
    ///
    /// A missing role means [`Role::Member`]. A blank display name is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailed`] if the user id is
    /// missing, blank or too long, or the role is unknown.
    pub fn authenticate(
        user_id: Option<&str>,
        display_name: Option<&str>,
        role: Option<&str>,
    ) -> Result<AuthenticatedActor, AuthError> {
        let user_id: &str = user_id.map(str::trim).unwrap_or_default();
        if user_id.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("No identity supplied"),
            });
        }
        if user_id.chars().count() > MAX_USER_ID_LENGTH {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("User id cannot exceed {MAX_USER_ID_LENGTH} characters"),
            });
        }

        let role: Role = match role {
            Some(value) => value.parse()?,
            None => Role::Member,
        };
        let display_name: Option<String> = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(AuthenticatedActor::new(
            user_id.to_string(),
            display_name,
            role,
        ))
    }
}

/// Role checks for admin-only operations.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if the actor may price an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_set_price(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_order_price")
    }

    /// Checks if the actor may mark an order paid or unpaid.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_set_paid(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_order_paid")
    }

    /// Checks if the actor may change the closure override.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_set_closure(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_closure")
    }

    /// Checks if the actor may curate the weekly special.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_special(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_special")
    }

    /// Checks if the actor may edit the ingredient catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_catalog(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_catalog")
    }

    /// Checks if the actor may read statistics across all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_view_global_statistics(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_global_statistics")
    }

    /// Checks if the actor may broadcast a manual notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_send_push(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "send_push")
    }

    /// Checks if the actor may read the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_view_audit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_audit")
    }
}

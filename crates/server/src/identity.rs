// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity extraction for the server.
//!
//! Identity is established upstream by the identity collaborator, which
//! forwards it in request headers. This module reads those headers and
//! turns them into an [`AuthenticatedActor`].

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use bocadillo_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

/// Header carrying the stable user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the display name.
pub const USER_NAME_HEADER: &str = "x-user-name";
/// Header carrying the role (`admin` or `member`).
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the requesting person.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     Identity(actor): Identity,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the user id header is missing or blank,
/// a header is not valid UTF-8, or the role is unknown.
pub struct Identity(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: Option<&str> = header(&parts.headers, USER_ID_HEADER)?;
        let display_name: Option<&str> = header(&parts.headers, USER_NAME_HEADER)?;
        let role: Option<&str> = header(&parts.headers, USER_ROLE_HEADER)?;

        let actor: AuthenticatedActor =
            AuthenticationService::authenticate(user_id, display_name, role).map_err(|e| {
                debug!(error = %e, "Identity rejected");
                IdentityError::Rejected(e.to_string())
            })?;

        debug!(user_id = %actor.user_id, role = ?actor.role, "Identity accepted");
        Ok(Self(actor))
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, IdentityError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Identity header is not valid UTF-8");
                IdentityError::InvalidHeader(name.to_string())
            })
        })
        .transpose()
}

/// Identity extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// A header could not be decoded.
    InvalidHeader(String),
    /// The identity fields were rejected.
    Rejected(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::InvalidHeader(name) => format!("Header '{name}' is not valid UTF-8"),
            Self::Rejected(reason) => reason,
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}

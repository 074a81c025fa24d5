// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Request-scoped identity.
//!
//! The middleware attaches a [`RequestIdentity`] to the request
//! extensions when a valid bearer token is present; nothing is stored in
//! ambient global state. Handlers that require a signed-in user take the
//! [`CurrentUser`] extractor, which rejects with 401 when no identity was
//! attached. Authentication failure is not authorization failure; the
//! rejection happens here, not in the middleware.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// The verified identity of the requester, scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    /// Verified subject email from the session token.
    pub email: String,
    /// Granted authorities. Always empty; the service does not assign
    /// roles at authentication time.
    pub authorities: Vec<String>,
}

impl RequestIdentity {
    pub fn authenticated(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            authorities: Vec::new(),
        }
    }
}

/// Extractor for handlers that require a signed-in user.
///
/// ```rust,ignore
/// async fn handler(CurrentUser(identity): CurrentUser) -> impl IntoResponse {
///     // identity.email is the verified subject
/// }
/// ```
pub struct CurrentUser(pub RequestIdentity);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

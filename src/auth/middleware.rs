// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Per-request authentication middleware.
//!
//! Runs before every handler. Requests to exempt path prefixes skip
//! token inspection entirely. Everywhere else the middleware extracts
//! the Bearer token, validates it, and attaches a [`RequestIdentity`]
//! on success.
//!
//! This layer fails open: a missing, malformed, or expired token leaves
//! the request anonymous and lets it proceed. Rejecting anonymous
//! requests is the responsibility of handlers that need a signed-in
//! user (via the `CurrentUser` extractor), not of this middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::identity::RequestIdentity;
use crate::state::AppState;

/// Authentication middleware function.
///
/// Installed with `axum::middleware::from_fn_with_state`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if state.exempt_paths.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        // No credential is not a failure at this layer.
        return next.run(request).await;
    };

    match state.tokens.validate(token) {
        Some(email) => {
            request
                .extensions_mut()
                .insert(RequestIdentity::authenticated(email));
        }
        None => {
            tracing::debug!("bearer token rejected; request proceeds anonymous");
        }
    }

    next.run(request).await
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let authorization = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = authorization.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Authentication flow errors.
//!
//! The closed set of outcomes the auth flows can surface. Sign-in keeps a
//! single generic credential failure so callers cannot probe which part
//! of a credential was wrong; storage faults are opaque by design.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Outcome taxonomy of the authentication flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The email is already registered.
    #[error("this email is already registered")]
    DuplicateEmail,
    /// The nickname is already taken.
    #[error("this nickname is already taken")]
    DuplicateNickname,
    /// Credential verification failed. Deliberately does not say which
    /// part of the credential was wrong.
    #[error("sign-in information does not match")]
    InvalidCredentials,
    /// An unexpected storage fault, with no backend detail attached.
    #[error("a storage error occurred")]
    Storage,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateEmail => "duplicate_email",
            AuthError::DuplicateNickname => "duplicate_nickname",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Storage => "storage_error",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail | AuthError::DuplicateNickname => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            StoreError::DuplicateNickname => AuthError::DuplicateNickname,
            StoreError::Backend(detail) => {
                tracing::error!(%detail, "account store failure");
                AuthError::Storage
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_codes() {
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::DuplicateNickname.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Storage.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_credentials_body_is_generic() {
        let response = AuthError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "invalid_credentials");
        // No field-level detail about what was wrong.
        assert!(!body["error"].as_str().unwrap().contains("email"));
        assert!(!body["error"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn storage_error_carries_no_backend_detail() {
        let err: AuthError = StoreError::Backend("connection refused to 10.0.0.3".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(!body.contains("10.0.0.3"));
    }

    #[test]
    fn store_conflicts_map_to_matching_variants() {
        assert_eq!(
            AuthError::from(StoreError::DuplicateEmail),
            AuthError::DuplicateEmail
        );
        assert_eq!(
            AuthError::from(StoreError::DuplicateNickname),
            AuthError::DuplicateNickname
        );
    }
}

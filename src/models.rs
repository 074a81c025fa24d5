// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! # API Data Models
//!
//! Request and response data structures used by the REST API, plus the
//! [`Account`] record shape shared with the account store. All API-facing
//! types derive `Serialize`, `Deserialize`, and `ToSchema` for automatic
//! JSON handling and OpenAPI documentation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Account
// =============================================================================

/// How an account was created. Immutable for the account's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginOrigin {
    /// Password-owned account created through sign-up.
    Local,
    /// Provider-owned account created through federated sign-in.
    Federated,
}

/// A user account, keyed by email.
///
/// Invariant: `password_hash` is present exactly when `origin` is
/// [`LoginOrigin::Local`]. The nickname is unique across all accounts;
/// the store's `save` enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account email, stored case-sensitively as given.
    pub email: String,
    /// Argon2 PHC hash of the password. `None` for federated accounts.
    pub password_hash: Option<String>,
    /// Globally unique display name.
    pub nickname: String,
    /// Profile image URL, if any.
    pub profile_image: Option<String>,
    /// Credential origin of this account.
    pub origin: LoginOrigin,
}

impl Account {
    /// Create a password-owned account.
    pub fn local(
        email: impl Into<String>,
        nickname: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: Some(password_hash.into()),
            nickname: nickname.into(),
            profile_image: None,
            origin: LoginOrigin::Local,
        }
    }

    /// Create a provider-owned account from federated claims.
    pub fn federated(
        email: impl Into<String>,
        nickname: impl Into<String>,
        profile_image: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: None,
            nickname: nickname.into(),
            profile_image,
            origin: LoginOrigin::Federated,
        }
    }
}

// =============================================================================
// Auth Requests
// =============================================================================

/// Request body for `POST /api/v1/auth/sign-up`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// Email to register. Becomes the account key.
    pub email: String,
    /// Plaintext password; hashed before storage, never persisted as given.
    pub password: String,
    /// Desired display name; must be unused.
    pub nickname: String,
}

/// Request body for `POST /api/v1/auth/sign-in`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/auth/google`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GoogleAuthRequest {
    /// Google-issued OIDC identity token.
    pub id_token: String,
}

// =============================================================================
// Auth Responses
// =============================================================================

/// Session token issued on successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// The signed-in user's account, as returned by `GET /api/v1/user`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        Self {
            email: account.email,
            nickname: account.nickname,
            profile_image: account.profile_image,
        }
    }
}

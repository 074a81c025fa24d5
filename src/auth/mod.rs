// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! # Authentication Module
//!
//! Everything that turns credentials into identities for the Openboard API.
//!
//! ## Session Flow
//!
//! 1. Client signs up with a password, or presents a Google ID token
//! 2. [`AuthService`] verifies the credential and issues an HS256 session
//!    token with a fixed 1-hour lifetime via [`TokenService`]
//! 3. Client sends `Authorization: Bearer <token>` on subsequent requests
//! 4. The [`middleware`] validates the token and attaches a
//!    [`RequestIdentity`] to the request scope
//!
//! ## Security
//!
//! - Session tokens are stateless; there is no revocation list, so the
//!   short TTL bounds the exposure window
//! - Google ID tokens are verified against Google's published JWKS with
//!   audience and issuer checks; key fetching is HTTPS-only and cached
//! - Token validation failures degrade to an anonymous identity; handlers
//!   that require a signed-in user reject explicitly via [`CurrentUser`]

pub mod error;
pub mod google;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use google::{FederatedClaims, GoogleVerifier, IdentityVerifier};
pub use identity::{CurrentUser, RequestIdentity};
pub use password::PasswordService;
pub use service::AuthService;
pub use token::TokenService;

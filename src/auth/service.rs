// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Authentication flows.
//!
//! Orchestrates sign-up, sign-in, and federated sign-in over the token
//! service, the password verifier, the federated identity verifier, and
//! the account store. Every flow terminates in one of the closed
//! [`AuthError`] outcomes; no lower-level fault escapes this boundary.

use std::sync::Arc;

use crate::auth::error::AuthError;
use crate::auth::google::{FederatedClaims, IdentityVerifier};
use crate::auth::password::PasswordService;
use crate::auth::token::TokenService;
use crate::models::{Account, LoginOrigin};
use crate::store::{AccountStore, StoreError};

/// Nickname used when a federated token carries no display name.
const FALLBACK_NICKNAME: &str = "GoogleUser";

/// Upper bound on nickname suffix attempts during federated
/// provisioning. Exhaustion surfaces as an opaque storage error.
const MAX_NICKNAME_ATTEMPTS: u32 = 64;

/// Sign-up, sign-in, and federated sign-in orchestration.
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    tokens: Arc<TokenService>,
    passwords: PasswordService,
    federated: Arc<dyn IdentityVerifier>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        tokens: Arc<TokenService>,
        federated: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            passwords: PasswordService::new(),
            federated,
        }
    }

    /// Register a password-owned account.
    pub async fn sign_up(
        &self,
        email: &str,
        nickname: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if self.accounts.exists_by_email(email).await? {
            return Err(AuthError::DuplicateEmail);
        }
        if self.accounts.exists_by_nickname(nickname).await? {
            return Err(AuthError::DuplicateNickname);
        }

        let hash = self.passwords.hash(password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AuthError::Storage
        })?;

        // The pre-checks race with concurrent sign-ups; the store's
        // uniqueness constraints are the last word.
        self.accounts
            .save(Account::local(email, nickname, hash))
            .await?;

        tracing::info!(nickname, "local account created");
        Ok(())
    }

    /// Verify a password credential and issue a session token.
    ///
    /// Unknown email, password-less (federated) account, and wrong
    /// password are indistinguishable to the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        let Some(stored_hash) = account.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.passwords.matches(password, stored_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(&account.email)
    }

    /// Verify a Google ID token, provisioning an account on first
    /// sign-in, and issue a session token.
    pub async fn google_auth(&self, id_token: &str) -> Result<String, AuthError> {
        let Some(claims) = self.federated.verify(id_token).await else {
            return Err(AuthError::InvalidCredentials);
        };
        let email = claims.email.clone();

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => match self.provision(&claims).await? {
                Some(account) => account,
                // The email was created concurrently between our lookup
                // and save; re-read and apply the existing-account rules.
                None => self
                    .accounts
                    .find_by_email(&email)
                    .await?
                    .ok_or(AuthError::Storage)?,
            },
        };

        if account.origin != LoginOrigin::Federated {
            // The email is owned by a password account; federated
            // sign-in must not take it over.
            return Err(AuthError::DuplicateEmail);
        }

        self.issue_token(&account.email)
    }

    /// Create a federated account with a collision-free nickname.
    ///
    /// Returns `Ok(None)` when the email itself was created concurrently,
    /// so the caller can re-read. Advances the suffix only on an explicit
    /// nickname conflict from the store.
    async fn provision(&self, claims: &FederatedClaims) -> Result<Option<Account>, AuthError> {
        let base = claims
            .name
            .clone()
            .unwrap_or_else(|| FALLBACK_NICKNAME.to_string());

        for attempt in 0..MAX_NICKNAME_ATTEMPTS {
            let candidate = if attempt == 0 {
                base.clone()
            } else {
                format!("{base}{attempt}")
            };

            // Cheap skip of known-taken candidates; the save below is
            // what actually decides.
            if self.accounts.exists_by_nickname(&candidate).await? {
                continue;
            }

            let account = Account::federated(&claims.email, candidate, claims.picture.clone());
            match self.accounts.save(account.clone()).await {
                Ok(()) => {
                    tracing::info!(nickname = %account.nickname, "federated account provisioned");
                    return Ok(Some(account));
                }
                Err(StoreError::DuplicateNickname) => continue,
                Err(StoreError::DuplicateEmail) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(%base, "nickname provisioning exhausted its attempt budget");
        Err(AuthError::Storage)
    }

    fn issue_token(&self, email: &str) -> Result<String, AuthError> {
        self.tokens.create(email).map_err(|e| {
            tracing::error!(error = %e, "session token encoding failed");
            AuthError::Storage
        })
    }
}

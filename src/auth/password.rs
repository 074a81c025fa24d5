// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Password hashing and verification.
//!
//! Argon2id with a fresh random salt per hash; the salt and parameters
//! travel inside the PHC-format output string. Verification re-derives
//! the digest and compares in full, so timing does not depend on where
//! a mismatch occurs.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

/// Failure to produce a password hash.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to gather salt entropy")]
    Entropy,
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// One-way password credential verifier.
#[derive(Default, Clone, Copy)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password into a PHC string with a random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|_| PasswordError::Entropy)?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

        let phc = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// An unparseable stored hash verifies as false rather than erroring;
    /// callers treat it the same as a wrong password.
    pub fn matches(&self, plaintext: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

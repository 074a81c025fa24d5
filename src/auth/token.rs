// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Stateless session tokens.
//!
//! Tokens are HS256-signed JWTs carrying only the subject email and the
//! issue/expiry timestamps. Nothing is persisted server-side; a token
//! "dies" by expiring.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed session token lifetime: one hour.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject: the account email.
    sub: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Issues and verifies session tokens with a shared symmetric secret.
///
/// Stateless and cheap to clone into request handlers; safe under
/// concurrent use.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for the given subject email, valid for one hour.
    pub fn create(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.create_at(email, Utc::now().timestamp())
    }

    fn create_at(
        &self,
        email: &str,
        issued_at: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a token and return its subject email.
    ///
    /// Total over arbitrary input: parse failures, signature mismatches,
    /// and expired tokens all return `None`.
    pub fn validate(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        // The TTL boundary is authoritative; no clock-skew grace.
        validation.leeway = 0;

        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims.sub),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret-key-for-session-tokens")
    }

    #[test]
    fn round_trip_returns_subject() {
        let tokens = service();
        let token = tokens.create("user@example.com").unwrap();
        assert_eq!(tokens.validate(&token), Some("user@example.com".into()));
    }

    #[test]
    fn token_valid_just_before_ttl() {
        let tokens = service();
        let issued_at = Utc::now().timestamp() - 59 * 60;
        let token = tokens.create_at("user@example.com", issued_at).unwrap();
        assert_eq!(tokens.validate(&token), Some("user@example.com".into()));
    }

    #[test]
    fn token_invalid_just_after_ttl() {
        let tokens = service();
        let issued_at = Utc::now().timestamp() - 61 * 60;
        let token = tokens.create_at("user@example.com", issued_at).unwrap();
        assert_eq!(tokens.validate(&token), None);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens.create("user@example.com").unwrap();

        // Flip one character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();

        assert_eq!(tokens.validate(&parts.join(".")), None);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tokens = service();
        let token = tokens.create("user@example.com").unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut sig: Vec<u8> = parts[2].clone().into_bytes();
        let last = sig.len() - 1;
        sig[last] = if sig[last] == b'A' { b'B' } else { b'A' };
        parts[2] = String::from_utf8(sig).unwrap();

        assert_eq!(tokens.validate(&parts.join(".")), None);
    }

    #[test]
    fn garbage_input_is_rejected() {
        let tokens = service();
        assert_eq!(tokens.validate(""), None);
        assert_eq!(tokens.validate("not-a-jwt"), None);
        assert_eq!(tokens.validate("a.b.c"), None);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenService::new(b"secret-one")
            .create("user@example.com")
            .unwrap();
        assert_eq!(TokenService::new(b"secret-two").validate(&token), None);
    }
}

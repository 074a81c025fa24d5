// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Google federated identity verification.
//!
//! Validates Google-issued OIDC ID tokens: signature against Google's
//! published JWKS, issuer, audience (the configured OAuth client ID), and
//! expiry. Callers receive either the extracted [`FederatedClaims`] or
//! `None`; which check failed is deliberately not exposed.
//!
//! ## Key material
//!
//! - JWKS is fetched via HTTPS only, with a request timeout
//! - Keys are cached with a TTL and tolerate concurrent readers
//! - A failed refresh fails closed: verification is rejected rather than
//!   accepting a token no current key can vouch for

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Google's JWKS endpoint for ID token signing keys.
const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Issuer values Google uses in ID tokens.
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

/// JWKS cache TTL (5 minutes).
const JWKS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Timeout for JWKS fetches.
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Clock skew tolerance for provider-issued tokens (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Claims extracted from a verified federated identity token.
///
/// Transient: used only to resolve or provision an account, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedClaims {
    /// Verified subject email.
    pub email: String,
    /// Display name, if the provider supplied one.
    pub name: Option<String>,
    /// Profile picture URL, if the provider supplied one.
    pub picture: Option<String>,
}

/// Verifies externally-issued identity tokens.
///
/// The seam between the orchestration layer and the provider; tests
/// substitute a canned implementation.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an ID token. Any failure collapses to `None`.
    async fn verify(&self, id_token: &str) -> Option<FederatedClaims>;
}

/// Raw claims of a Google ID token.
///
/// Issuer, audience, and expiry are validated by the `jsonwebtoken`
/// decoder; the fields here are only what we read afterwards.
#[derive(Debug, Deserialize)]
struct GoogleIdClaims {
    /// Stable Google subject identifier (unused; email is our key).
    #[serde(default)]
    #[allow(dead_code)]
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// JWKS cache entry.
struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// Google ID token verifier with JWKS caching.
pub struct GoogleVerifier {
    /// Expected audience: our OAuth client ID.
    client_id: String,
    /// JWKS endpoint.
    jwks_url: String,
    cache: RwLock<Option<CacheEntry>>,
    client: reqwest::Client,
}

impl GoogleVerifier {
    /// Create a verifier for the given OAuth client ID.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed; this runs once
    /// at startup.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
            cache: RwLock::new(None),
            client: reqwest::Client::builder()
                .timeout(JWKS_FETCH_TIMEOUT)
                .build()
                .expect("failed to create HTTP client"),
        }
    }

    /// The configured audience.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Whether signing keys are currently cached and fresh.
    pub async fn keys_cached(&self) -> bool {
        let cache = self.cache.read().await;
        match &*cache {
            Some(entry) => entry.fetched_at.elapsed() < JWKS_CACHE_TTL,
            None => false,
        }
    }

    /// Fetch the JWKS, serving from cache while fresh.
    async fn jwks(&self) -> Result<JwkSet, reqwest::Error> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < JWKS_CACHE_TTL {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CacheEntry {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, reqwest::Error> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Resolve the decoding key for a key ID.
    async fn decoding_key(&self, kid: &str) -> Option<(DecodingKey, Algorithm)> {
        let jwks = match self.jwks().await {
            Ok(jwks) => jwks,
            Err(e) => {
                tracing::warn!(error = %e, "JWKS fetch failed; rejecting federated token");
                return None;
            }
        };

        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))?;
        jwk_to_decoding_key(jwk)
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Option<FederatedClaims> {
        let header = decode_header(id_token).ok()?;
        let kid = header.kid?;
        let (decoding_key, algorithm) = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        let data = match decode::<GoogleIdClaims>(id_token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "federated token failed validation");
                return None;
            }
        };

        let claims = data.claims;
        let email = claims.email?;

        Some(FederatedClaims {
            email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}

/// Convert a JWK into a decoding key with its algorithm.
fn jwk_to_decoding_key(jwk: &Jwk) -> Option<(DecodingKey, Algorithm)> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => {
            let key = DecodingKey::from_rsa_components(&rsa.n, &rsa.e).ok()?;
            let alg = jwk
                .common
                .key_algorithm
                .and_then(|a| match a {
                    jsonwebtoken::jwk::KeyAlgorithm::RS256 => Some(Algorithm::RS256),
                    jsonwebtoken::jwk::KeyAlgorithm::RS384 => Some(Algorithm::RS384),
                    jsonwebtoken::jwk::KeyAlgorithm::RS512 => Some(Algorithm::RS512),
                    _ => None,
                })
                .unwrap_or(Algorithm::RS256);
            Some((key, alg))
        }
        AlgorithmParameters::EllipticCurve(ec) => {
            let key = DecodingKey::from_ec_components(&ec.x, &ec.y).ok()?;
            let alg = jwk
                .common
                .key_algorithm
                .and_then(|a| match a {
                    jsonwebtoken::jwk::KeyAlgorithm::ES256 => Some(Algorithm::ES256),
                    jsonwebtoken::jwk::KeyAlgorithm::ES384 => Some(Algorithm::ES384),
                    _ => None,
                })
                .unwrap_or(Algorithm::ES256);
            Some((key, alg))
        }
        _ => None,
    }
}

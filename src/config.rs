// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_SECRET_KEY` | Shared secret for session token signing | Required |
//! | `GOOGLE_CLIENT_ID` | Expected audience of Google ID tokens | Required |
//! | `AUTH_EXEMPT_PATHS` | Comma-separated path prefixes that skip token inspection | See below |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use thiserror::Error;

/// Environment variable name for the session token signing secret.
pub const SECRET_KEY_ENV: &str = "AUTH_SECRET_KEY";

/// Environment variable name for the Google OAuth client identifier.
pub const GOOGLE_CLIENT_ID_ENV: &str = "GOOGLE_CLIENT_ID";

/// Environment variable name for the middleware exemption prefix list.
pub const EXEMPT_PATHS_ENV: &str = "AUTH_EXEMPT_PATHS";

/// Path prefixes exempt from token inspection when `AUTH_EXEMPT_PATHS`
/// is not set: the auth endpoints themselves, the search and file
/// collaborator surfaces, and the operational endpoints.
pub const DEFAULT_EXEMPT_PATHS: &[&str] = &[
    "/api/v1/auth",
    "/api/v1/search",
    "/api/v1/file",
    "/health",
    "/docs",
    "/api-doc",
];

/// Configuration error raised during startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {0} has an invalid value: {1}")]
    InvalidVar(&'static str, String),
}

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Shared secret for session token signing (HS256).
    pub secret_key: String,
    /// Expected audience claim of Google ID tokens.
    pub google_client_id: String,
    /// Path prefixes exempt from middleware token inspection.
    pub exempt_paths: Vec<String>,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("PORT", raw))?,
            Err(_) => 8080,
        };

        let secret_key =
            env::var(SECRET_KEY_ENV).map_err(|_| ConfigError::MissingVar(SECRET_KEY_ENV))?;
        let google_client_id = env::var(GOOGLE_CLIENT_ID_ENV)
            .map_err(|_| ConfigError::MissingVar(GOOGLE_CLIENT_ID_ENV))?;

        let exempt_paths = match env::var(EXEMPT_PATHS_ENV) {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => default_exempt_paths(),
        };

        Ok(Self {
            host,
            port,
            secret_key,
            google_client_id,
            exempt_paths,
        })
    }
}

/// The default exemption list as owned strings.
pub fn default_exempt_paths() -> Vec<String> {
    DEFAULT_EXEMPT_PATHS.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exempt_paths_cover_auth_search_and_file() {
        let paths = default_exempt_paths();
        assert!(paths.iter().any(|p| p == "/api/v1/auth"));
        assert!(paths.iter().any(|p| p == "/api/v1/search"));
        assert!(paths.iter().any(|p| p == "/api/v1/file"));
    }
}

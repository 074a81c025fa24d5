// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

use std::sync::Arc;

use crate::auth::{AuthService, TokenService};
use crate::store::AccountStore;

/// Shared application state.
///
/// Everything here is read-only or internally synchronized; requests
/// never share mutable state with each other.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    /// Path prefixes the authentication middleware skips entirely.
    pub exempt_paths: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        tokens: Arc<TokenService>,
        auth: Arc<AuthService>,
        exempt_paths: Vec<String>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            auth,
            exempt_paths: Arc::new(exempt_paths),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::auth::google::test_support::StaticVerifier;
    use crate::auth::FederatedClaims;
    use crate::config::default_exempt_paths;
    use crate::store::InMemoryAccountStore;

    /// Secret used by every test state, so tests can mint matching tokens.
    pub(crate) const TEST_SECRET: &[u8] = b"test-secret";

    /// In-memory state with a canned federated verifier outcome.
    pub(crate) fn state_with_verifier(verified: Option<FederatedClaims>) -> AppState {
        let accounts: Arc<InMemoryAccountStore> = Arc::new(InMemoryAccountStore::new());
        let tokens = Arc::new(TokenService::new(TEST_SECRET));
        let auth = Arc::new(AuthService::new(
            accounts.clone(),
            tokens.clone(),
            Arc::new(StaticVerifier(verified)),
        ));
        AppState::new(accounts, tokens, auth, default_exempt_paths())
    }

    /// In-memory state whose federated verifier rejects everything.
    pub(crate) fn test_state() -> AppState {
        state_with_verifier(None)
    }
}

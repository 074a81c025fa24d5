// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Account store boundary.
//!
//! The rest of the service persists accounts only through the narrow
//! [`AccountStore`] trait. Uniqueness of both email and nickname is
//! enforced inside `save` under a single write lock, so callers can rely
//! on a conflict signal instead of their own check-then-act reads.
//!
//! The in-memory implementation backs the binary and the tests; a
//! database-backed implementation would enforce the same constraints
//! with unique indexes.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::Account;

/// Storage failure surfaced to the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An account with this email already exists.
    #[error("email already registered")]
    DuplicateEmail,
    /// An account with this nickname already exists.
    #[error("nickname already taken")]
    DuplicateNickname,
    /// Any other backend fault.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence interface for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] or
    /// [`StoreError::DuplicateNickname`] when a uniqueness constraint is
    /// violated; both checks happen atomically with the insert.
    async fn save(&self, account: Account) -> Result<(), StoreError>;
}

/// In-memory account store keyed by email.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.contains_key(email))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.nickname == nickname))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }

    async fn save(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if accounts.values().any(|a| a.nickname == account.nickname) {
            return Err(StoreError::DuplicateNickname);
        }

        accounts.insert(account.email.clone(), account);
        Ok(())
    }
}

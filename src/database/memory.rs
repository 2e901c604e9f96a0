// ABOUTME: In-memory AccountStore implementation using sharded concurrent maps
// ABOUTME: Backs tests and single-process deployments; email uniqueness enforced atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;
use verbum_core::errors::{AppError, AppResult};

use super::{Account, AccountSnapshot, AccountStore, NewAccount};

/// Account store held entirely in process memory
///
/// Lock order is always `emails` before `accounts`.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<String, Account>>,
    emails: Arc<DashMap<String, String>>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Get a full account record by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    fn modify<F>(&self, id: &str, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut Account),
    {
        let mut account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Account {id}")))?;
        let account = account.value_mut();
        apply(account);
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AccountSnapshot>> {
        Ok(self.accounts.get(id).map(|entry| entry.snapshot()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let Some(id) = self.emails.get(email).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        Ok(self.get(&id))
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        match self.emails.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(AppError::already_exists("Account with this email")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let record = Account {
                    id: Uuid::new_v4().to_string(),
                    name: account.name,
                    email: account.email,
                    hashed_secret: account.hashed_secret,
                    is_active: true,
                    signin_trials: 0,
                    reset_token: None,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(record.id.clone());
                self.accounts.insert(record.id.clone(), record.clone());
                debug!(account_id = %record.id, "Account created");
                Ok(record)
            }
        }
    }

    async fn record_failed_signin(&self, id: &str) -> AppResult<u32> {
        let mut trials = 0;
        self.modify(id, |account| {
            account.signin_trials = account.signin_trials.saturating_add(1);
            trials = account.signin_trials;
        })?;
        Ok(trials)
    }

    async fn reset_signin_trials(&self, id: &str) -> AppResult<()> {
        self.modify(id, |account| account.signin_trials = 0)
    }

    async fn set_active(&self, id: &str, active: bool) -> AppResult<()> {
        self.modify(id, |account| account.is_active = active)
    }

    async fn set_reset_token(&self, id: &str, token: Option<String>) -> AppResult<()> {
        self.modify(id, |account| account.reset_token = token)
    }

    async fn update_secret(&self, id: &str, hashed_secret: &str) -> AppResult<()> {
        self.modify(id, |account| hashed_secret.clone_into(&mut account.hashed_secret))
    }

    async fn update_email(&self, id: &str, email: &str) -> AppResult<()> {
        let old_email = self
            .accounts
            .get(id)
            .map(|entry| entry.email.clone())
            .ok_or_else(|| AppError::not_found(format!("Account {id}")))?;

        if old_email == email {
            return Ok(());
        }

        match self.emails.entry(email.to_owned()) {
            Entry::Occupied(_) => Err(AppError::already_exists("Account with this email")),
            Entry::Vacant(slot) => {
                slot.insert(id.to_owned());
                self.modify(id, |account| email.clone_into(&mut account.email))?;
                self.emails.remove(&old_email);
                Ok(())
            }
        }
    }
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, codec and store fixtures, and a failing account store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `verbum_server`

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use async_trait::async_trait;
use tracing::Level;
use verbum_server::auth::TokenValidator;
use verbum_server::crypto::{hash_password, TokenKey};
use verbum_server::database::{
    Account, AccountSnapshot, AccountStore, InMemoryAccountStore, NewAccount,
};
use verbum_server::errors::{AppError, AppResult};
use verbum_server::services::AccountService;
use verbum_server::tokens::TokenCodec;

static INIT_LOGGER: Once = Once::new();

/// Password used by seeded accounts
pub const TEST_PASSWORD: &str = "quotes-are-forever";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed key so failures are reproducible
pub fn test_key() -> TokenKey {
    TokenKey::from_bytes([7u8; 32])
}

/// Codec with the standard 30-day lifetime under the fixed test key
pub fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::with_default_lifetime(&test_key()))
}

/// Empty in-memory store
pub fn test_store() -> Arc<InMemoryAccountStore> {
    init_test_logging();
    Arc::new(InMemoryAccountStore::new())
}

/// Validator over the given store and the test codec
pub fn test_validator(store: Arc<InMemoryAccountStore>) -> TokenValidator {
    TokenValidator::new(test_codec(), store)
}

/// Account service with a lockout threshold of `max_attempts`
pub fn test_service(store: Arc<InMemoryAccountStore>, max_attempts: u32) -> AccountService {
    AccountService::new(store, test_codec(), max_attempts)
}

/// Insert an account whose password is [`TEST_PASSWORD`]
pub async fn seed_account(store: &InMemoryAccountStore, email: &str) -> Result<Account> {
    let hashed_secret = hash_password(TEST_PASSWORD.to_owned()).await?;
    let account = store
        .insert(NewAccount {
            name: "Marcus".into(),
            email: email.into(),
            hashed_secret,
        })
        .await?;
    Ok(account)
}

/// Store whose every call fails, standing in for an unreachable database
pub struct UnavailableStore;

#[async_trait]
impl AccountStore for UnavailableStore {
    async fn find_by_id(&self, _id: &str) -> AppResult<Option<AccountSnapshot>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
        Err(AppError::database("connection refused"))
    }

    async fn insert(&self, _account: NewAccount) -> AppResult<Account> {
        Err(AppError::database("connection refused"))
    }

    async fn record_failed_signin(&self, _id: &str) -> AppResult<u32> {
        Err(AppError::database("connection refused"))
    }

    async fn reset_signin_trials(&self, _id: &str) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn set_active(&self, _id: &str, _active: bool) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn set_reset_token(&self, _id: &str, _token: Option<String>) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn update_secret(&self, _id: &str, _hashed_secret: &str) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn update_email(&self, _id: &str, _email: &str) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }
}

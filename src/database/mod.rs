// ABOUTME: Account storage abstraction consumed by the token validator and account flows
// ABOUTME: Defines the AccountStore trait, account records, and the read-only snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Account Storage
//!
//! The validator only ever calls [`AccountStore::find_by_id`]. The write
//! methods exist for the account flows in [`crate::services::accounts`].

/// In-memory store backed by `DashMap`
pub mod memory;

pub use memory::InMemoryAccountStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verbum_core::errors::AppResult;

/// Account state the validator cross-checks a token against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Account ID
    pub id: String,
    /// Current email address
    pub email: String,
    /// Current password hash
    pub hashed_secret: String,
    /// Whether the account may authenticate
    pub is_active: bool,
}

/// Stored account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID (UUID v4 text)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, unique across accounts
    pub email: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub hashed_secret: String,
    /// Whether the account may authenticate
    pub is_active: bool,
    /// Consecutive failed sign-ins
    pub signin_trials: u32,
    /// Outstanding password reset token, if any
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Project the fields the validator needs
    #[must_use]
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id.clone(),
            email: self.email.clone(),
            hashed_secret: self.hashed_secret.clone(),
            is_active: self.is_active,
        }
    }
}

/// Fields supplied when registering an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Argon2 PHC string
    pub hashed_secret: String,
}

/// Account persistence
///
/// Implementations must be safe for concurrent use from many request tasks.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get the validator's view of an account by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AccountSnapshot>>;

    /// Get a full account record by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Create an account, failing with `ResourceAlreadyExists` on a taken email
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;

    /// Count a failed sign-in and return the new trial count
    async fn record_failed_signin(&self, id: &str) -> AppResult<u32>;

    /// Clear the failed sign-in counter
    async fn reset_signin_trials(&self, id: &str) -> AppResult<()>;

    /// Enable or disable authentication for the account
    async fn set_active(&self, id: &str, active: bool) -> AppResult<()>;

    /// Store or clear the outstanding password reset token
    async fn set_reset_token(&self, id: &str, token: Option<String>) -> AppResult<()>;

    /// Replace the password hash
    async fn update_secret(&self, id: &str, hashed_secret: &str) -> AppResult<()>;

    /// Change the email address, failing with `ResourceAlreadyExists` on a taken email
    async fn update_email(&self, id: &str, email: &str) -> AppResult<()>;
}

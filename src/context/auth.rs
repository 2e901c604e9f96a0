// ABOUTME: Authentication context for dependency injection of token and account services
// ABOUTME: Built once at startup from configuration and an account store, then cloned per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::auth::TokenValidator;
use crate::config::ServerConfig;
use crate::database::AccountStore;
use crate::services::AccountService;
use crate::tokens::TokenCodec;

/// Authentication context containing auth-related dependencies
///
/// The codec and store are shared by `Arc`; cloning the context is cheap.
#[derive(Clone)]
pub struct AuthContext {
    codec: Arc<TokenCodec>,
    accounts: AccountService,
}

impl AuthContext {
    /// Create new authentication context
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn AccountStore>,
        max_signin_attempts: u32,
    ) -> Self {
        let accounts = AccountService::new(store, codec.clone(), max_signin_attempts);
        Self { codec, accounts }
    }

    /// Build the context from resolved server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig, store: Arc<dyn AccountStore>) -> Self {
        let codec = Arc::new(TokenCodec::new(&config.token_key, config.token_lifetime));
        Self::new(codec, store, config.max_signin_attempts)
    }

    /// Get the token codec
    #[must_use]
    pub const fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Get the token validator for request authentication
    #[must_use]
    pub const fn validator(&self) -> &TokenValidator {
        self.accounts.validator()
    }

    /// Get the account flows
    #[must_use]
    pub const fn accounts(&self) -> &AccountService {
        &self.accounts
    }
}

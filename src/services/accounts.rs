// ABOUTME: Account flows that issue and re-issue tokens: sign-up, sign-in lockout, password reset
// ABOUTME: Email and password changes return a fresh auth token since old ones stop validating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use verbum_core::constants::{accounts, token_purposes};
use verbum_core::errors::{AppError, AppResult};

use crate::auth::{Principal, TokenValidator};
use crate::crypto::{hash_password, verify_password};
use crate::database::{Account, AccountStore, NewAccount};
use crate::tokens::TokenCodec;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

const SIGNIN_FAILED: &str = "User authentication failed";
const RESET_FAILED: &str = "Password reset failed";
const TOKEN_INVALID: &str = "Invalid or expired token";

/// Result of any flow that authenticates the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    /// Account ID
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Freshly issued auth token
    pub auth_token: String,
}

/// Check basic email shape
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Check the minimum password length, ignoring surrounding whitespace
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.trim().chars().count() > accounts::MIN_PASSWORD_CHARS
}

fn validate_email(email: &str) -> AppResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::invalid_input("Invalid email."))
    }
}

fn validate_password(password: &str) -> AppResult<()> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Password must be longer than {} characters.",
            accounts::MIN_PASSWORD_CHARS
        )))
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::invalid_input("User name is required."));
    }
    if name.chars().count() > accounts::MAX_NAME_CHARS {
        return Err(AppError::invalid_input("User name is too long."));
    }
    Ok(())
}

/// Account lifecycle operations
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    codec: Arc<TokenCodec>,
    validator: TokenValidator,
    max_signin_attempts: u32,
}

impl AccountService {
    /// Create the service; the validator shares the same codec and store
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        codec: Arc<TokenCodec>,
        max_signin_attempts: u32,
    ) -> Self {
        let validator = TokenValidator::new(codec.clone(), accounts.clone());
        Self {
            accounts,
            codec,
            validator,
            max_signin_attempts: max_signin_attempts.max(1),
        }
    }

    /// Validator for request authentication
    #[must_use]
    pub const fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    /// Register an account and sign it in
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad email, name, or password and
    /// `ResourceAlreadyExists` if the email is taken.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<SessionGrant> {
        validate_email(email)?;
        validate_name(name)?;
        validate_password(password)?;

        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AppError::already_exists("Account with this email"));
        }

        let hashed_secret = hash_password(password.to_owned()).await?;
        let account = self
            .accounts
            .insert(NewAccount {
                name: name.to_owned(),
                email: email.to_owned(),
                hashed_secret,
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        self.grant(&account.id, &account.name, &account.email, &account.hashed_secret)
    }

    /// Authenticate with email and password
    ///
    /// A wrong password counts toward the lockout threshold; reaching it
    /// deactivates the account, which then stays locked until it is
    /// reinstated with [`AccountStore::set_active`].
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` with one generic message for every failure cause.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SessionGrant> {
        if !is_valid_email(email) {
            return Err(AppError::auth_invalid(SIGNIN_FAILED));
        }
        let Some(account) = self.accounts.find_by_email(email).await? else {
            return Err(AppError::auth_invalid(SIGNIN_FAILED));
        };

        if account.signin_trials >= self.max_signin_attempts || !account.is_active {
            warn!(account_id = %account.id, "Sign-in refused for locked account");
            return Err(AppError::auth_invalid(SIGNIN_FAILED));
        }

        if !verify_password(password.to_owned(), account.hashed_secret.clone()).await? {
            let trials = self.accounts.record_failed_signin(&account.id).await?;
            if trials >= self.max_signin_attempts {
                self.accounts.set_active(&account.id, false).await?;
                warn!(
                    account_id = %account.id,
                    trials,
                    "Account locked after repeated failed sign-ins"
                );
            }
            return Err(AppError::auth_invalid(SIGNIN_FAILED));
        }

        if account.signin_trials > 0 {
            self.accounts.reset_signin_trials(&account.id).await?;
        }

        self.grant(&account.id, &account.name, &account.email, &account.hashed_secret)
    }

    /// Issue a password reset token and record it on the account
    ///
    /// The caller delivers the returned token to the account's email address.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad email and `ResourceNotFound` for an
    /// unknown one.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<String> {
        validate_email(email)?;
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("Account"))?;

        let token = self.codec.issue_reset(
            &account.id,
            &account.email,
            token_purposes::PASSWORD_RESET,
            Utc::now(),
        )?;
        self.accounts
            .set_reset_token(&account.id, Some(token.clone()))
            .await?;

        info!(account_id = %account.id, "Password reset requested");
        Ok(token)
    }

    /// Set a new password using a reset token
    ///
    /// Clears the reset token and failed sign-ins. A locked account stays
    /// locked: its reset tokens do not validate until it is reinstated.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the token is invalid, expired, issued for
    /// another email, or already used, and `InvalidInput` for a short password.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        reset_token: &str,
    ) -> AppResult<SessionGrant> {
        let principal = self
            .validator
            .validate_reset(reset_token, token_purposes::PASSWORD_RESET)
            .await
            .ok_or_else(|| AppError::auth_invalid(RESET_FAILED))?;

        if principal.email != email {
            return Err(AppError::auth_invalid(RESET_FAILED));
        }
        validate_password(new_password)?;

        let account = self.account_for(&principal.subject_id, email).await?;
        let outstanding: bool = account.reset_token.as_deref().is_some_and(|stored| {
            stored.as_bytes().ct_eq(reset_token.as_bytes()).into()
        });
        if !outstanding {
            return Err(AppError::auth_invalid(RESET_FAILED));
        }

        let hashed_secret = hash_password(new_password.to_owned()).await?;
        self.accounts
            .update_secret(&account.id, &hashed_secret)
            .await?;
        self.accounts.set_reset_token(&account.id, None).await?;
        self.accounts.reset_signin_trials(&account.id).await?;

        info!(account_id = %account.id, "Password reset completed");
        self.grant(&account.id, &account.name, &account.email, &hashed_secret)
    }

    /// Change the account email and re-issue the auth token
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for an invalid token, `InvalidInput` for a bad
    /// email, and `ResourceAlreadyExists` if the email is taken.
    pub async fn change_email(&self, auth_token: &str, new_email: &str) -> AppResult<SessionGrant> {
        let principal = self.authenticate(auth_token).await?;
        validate_email(new_email)?;

        self.accounts
            .update_email(&principal.subject_id, new_email)
            .await?;
        let account = self.account_for(&principal.subject_id, new_email).await?;

        info!(account_id = %account.id, "Account email changed");
        self.grant(&account.id, &account.name, &account.email, &account.hashed_secret)
    }

    /// Change the account password and re-issue the auth token
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for an invalid token or wrong current password and
    /// `InvalidInput` for a short new password.
    pub async fn change_password(
        &self,
        auth_token: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<SessionGrant> {
        let principal = self.authenticate(auth_token).await?;
        let account = self
            .account_for(&principal.subject_id, &principal.email)
            .await?;

        if !verify_password(current_password.to_owned(), account.hashed_secret.clone()).await? {
            return Err(AppError::auth_invalid("Current password is incorrect"));
        }
        validate_password(new_password)?;

        let hashed_secret = hash_password(new_password.to_owned()).await?;
        self.accounts
            .update_secret(&account.id, &hashed_secret)
            .await?;

        info!(account_id = %account.id, "Account password changed");
        self.grant(&account.id, &account.name, &account.email, &hashed_secret)
    }

    async fn authenticate(&self, auth_token: &str) -> AppResult<Principal> {
        self.validator
            .validate_auth(auth_token)
            .await
            .ok_or_else(|| AppError::auth_invalid(TOKEN_INVALID))
    }

    async fn account_for(&self, subject_id: &str, email: &str) -> AppResult<Account> {
        self.accounts
            .find_by_email(email)
            .await?
            .filter(|account| account.id == subject_id)
            .ok_or_else(|| AppError::auth_invalid(TOKEN_INVALID))
    }

    fn grant(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        hashed_secret: &str,
    ) -> AppResult<SessionGrant> {
        let auth_token = self
            .codec
            .issue_auth(user_id, email, hashed_secret, Utc::now())?;
        Ok(SessionGrant {
            user_id: user_id.to_owned(),
            name: name.to_owned(),
            auth_token,
        })
    }
}

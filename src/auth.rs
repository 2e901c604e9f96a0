// ABOUTME: Token validation against live account state
// ABOUTME: Collapses every decode, expiry, account, and purpose failure into an anonymous outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Token Validation
//!
//! A token authorizes its subject only while the account it names still
//! exists, is active, has the same email, and (for auth tokens) the same
//! password hash as at issuance. Changing the password or email therefore
//! revokes every outstanding token without a revocation list.
//!
//! Callers receive `Option`s. The reason for a rejection is logged and then
//! dropped so no client can tell a bad signature from an expired token.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::database::{AccountSnapshot, AccountStore};
use crate::tokens::{AuthClaims, ClaimsSchema, DecodeFailure, ResetClaims, TokenCodec};

/// Subject authenticated by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account ID
    pub subject_id: String,
    /// Account email
    pub email: String,
}

/// Subject authorized by a reset token for one purpose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPrincipal {
    /// Account ID
    pub subject_id: String,
    /// Account email
    pub email: String,
    /// Operation the token was issued for
    pub purpose: String,
}

/// Why a token was refused; never leaves this module
#[derive(Debug)]
enum Rejection {
    Decode(DecodeFailure),
    Expired { expires_at: DateTime<Utc> },
    AccountMissing,
    AccountInactive,
    AccountMismatch { field: &'static str },
    PurposeMismatch { expected: String, actual: String },
    StoreUnavailable(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(failure) => write!(f, "decode failed: {failure}"),
            Self::Expired { expires_at } => write!(f, "expired at {expires_at}"),
            Self::AccountMissing => f.write_str("account not found"),
            Self::AccountInactive => f.write_str("account inactive"),
            Self::AccountMismatch { field } => write!(f, "{field} no longer matches account"),
            Self::PurposeMismatch { expected, actual } => {
                write!(f, "purpose '{actual}' where '{expected}' was required")
            }
            Self::StoreUnavailable(reason) => write!(f, "account store unavailable: {reason}"),
        }
    }
}

impl From<DecodeFailure> for Rejection {
    fn from(failure: DecodeFailure) -> Self {
        Self::Decode(failure)
    }
}

/// Decides whether tokens currently authorize their subjects
#[derive(Clone)]
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
    accounts: Arc<dyn AccountStore>,
}

impl TokenValidator {
    /// Create a validator over a shared codec and account store
    #[must_use]
    pub fn new(codec: Arc<TokenCodec>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { codec, accounts }
    }

    /// Codec used to decode tokens
    #[must_use]
    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Validate a session token at the current time
    pub async fn validate_auth(&self, token: &str) -> Option<Principal> {
        self.validate_auth_at(token, Utc::now()).await
    }

    /// Validate a session token as of `now`
    pub async fn validate_auth_at(&self, token: &str, now: DateTime<Utc>) -> Option<Principal> {
        match self.check_auth(token, now).await {
            Ok(principal) => Some(principal),
            Err(rejection) => {
                Self::log_rejection(AuthClaims::KIND, &rejection);
                None
            }
        }
    }

    /// Validate a reset token for `expected_purpose` at the current time
    pub async fn validate_reset(
        &self,
        token: &str,
        expected_purpose: &str,
    ) -> Option<ResetPrincipal> {
        self.validate_reset_at(token, expected_purpose, Utc::now())
            .await
    }

    /// Validate a reset token for `expected_purpose` as of `now`
    pub async fn validate_reset_at(
        &self,
        token: &str,
        expected_purpose: &str,
        now: DateTime<Utc>,
    ) -> Option<ResetPrincipal> {
        match self.check_reset(token, expected_purpose, now).await {
            Ok(principal) => Some(principal),
            Err(rejection) => {
                Self::log_rejection(ResetClaims::KIND, &rejection);
                None
            }
        }
    }

    async fn check_auth(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, Rejection> {
        let claims: AuthClaims = self.codec.decode(token)?;
        ensure_unexpired(&claims, now)?;

        let account = self.live_account(&claims.subject_id, &claims.email).await?;

        let fingerprint_matches: bool = claims
            .secret_fingerprint
            .as_bytes()
            .ct_eq(account.hashed_secret.as_bytes())
            .into();
        if !fingerprint_matches {
            return Err(Rejection::AccountMismatch {
                field: "secret fingerprint",
            });
        }

        Ok(Principal {
            subject_id: claims.subject_id,
            email: claims.email,
        })
    }

    async fn check_reset(
        &self,
        token: &str,
        expected_purpose: &str,
        now: DateTime<Utc>,
    ) -> Result<ResetPrincipal, Rejection> {
        let claims: ResetClaims = self.codec.decode(token)?;
        ensure_unexpired(&claims, now)?;

        if claims.purpose != expected_purpose {
            return Err(Rejection::PurposeMismatch {
                expected: expected_purpose.to_owned(),
                actual: claims.purpose,
            });
        }

        self.live_account(&claims.subject_id, &claims.email).await?;

        Ok(ResetPrincipal {
            subject_id: claims.subject_id,
            email: claims.email,
            purpose: claims.purpose,
        })
    }

    /// One fresh lookup per validation; the snapshot is never cached
    async fn live_account(
        &self,
        subject_id: &str,
        email: &str,
    ) -> Result<AccountSnapshot, Rejection> {
        let account = self
            .accounts
            .find_by_id(subject_id)
            .await
            .map_err(|e| Rejection::StoreUnavailable(e.to_string()))?
            .ok_or(Rejection::AccountMissing)?;

        if !account.is_active {
            return Err(Rejection::AccountInactive);
        }
        if account.email != email {
            return Err(Rejection::AccountMismatch { field: "email" });
        }
        Ok(account)
    }

    fn log_rejection(kind: &str, rejection: &Rejection) {
        if matches!(rejection, Rejection::StoreUnavailable(_)) {
            warn!(token_kind = kind, reason = %rejection, "Token rejected");
        } else {
            debug!(token_kind = kind, reason = %rejection, "Token rejected");
        }
    }
}

fn ensure_unexpired<C: ClaimsSchema>(claims: &C, now: DateTime<Utc>) -> Result<(), Rejection> {
    let expires_at = claims.expires_at();
    if now >= expires_at {
        return Err(Rejection::Expired { expires_at });
    }
    Ok(())
}

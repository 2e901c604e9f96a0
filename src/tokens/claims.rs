// ABOUTME: Claims carried inside auth and password-reset tokens
// ABOUTME: Strict per-type parsing that fails closed on unknown keys, missing keys, or wrong types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a token string could not be turned back into claims
///
/// Callers outside the validator must treat every variant the same as
/// "no token supplied"; the variants exist for internal logging only.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// Token text is not URL-safe base64
    #[error("token is not valid base64url")]
    Encoding,

    /// Token is too short to hold a nonce and authentication tag
    #[error("token is truncated")]
    Truncated,

    /// Decryption or authentication failed (wrong key, tampering, wrong token kind)
    #[error("token failed authentication")]
    Authentication,

    /// Plaintext does not match the claims schema
    #[error("token claims rejected: {reason}")]
    Schema {
        /// What the strict parser objected to
        reason: String,
    },
}

/// A claims type that can be sealed into a token
///
/// `KIND` is bound into the ciphertext as associated data, so a token minted
/// for one claims type fails authentication when decoded as another.
pub trait ClaimsSchema: Serialize + Sized {
    /// Token kind tag
    const KIND: &'static str;

    /// Parse decrypted plaintext into claims, rejecting anything but the exact schema
    ///
    /// # Errors
    ///
    /// Returns [`DecodeFailure::Schema`] for non-object JSON, unknown or missing
    /// keys, wrongly typed values, and unparseable timestamps.
    fn from_json(plaintext: &[u8]) -> Result<Self, DecodeFailure>;

    /// Instant at which the claims stop being valid
    fn expires_at(&self) -> DateTime<Utc>;
}

/// Claims of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthClaims {
    /// Account ID the token was issued to
    pub subject_id: String,
    /// Account email at issuance
    pub email: String,
    /// Account password hash at issuance
    pub secret_fingerprint: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

impl ClaimsSchema for AuthClaims {
    const KIND: &'static str = "auth";

    fn from_json(plaintext: &[u8]) -> Result<Self, DecodeFailure> {
        parse_flat_object(plaintext)
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Claims of a single-purpose reset token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResetClaims {
    /// Account ID the token was issued to
    pub subject_id: String,
    /// Account email at issuance
    pub email: String,
    /// Operation the token authorizes, e.g. `password_reset`
    pub purpose: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

impl ClaimsSchema for ResetClaims {
    const KIND: &'static str = "reset";

    fn from_json(plaintext: &[u8]) -> Result<Self, DecodeFailure> {
        let claims: Self = parse_flat_object(plaintext)?;
        if claims.purpose.is_empty() {
            return Err(DecodeFailure::Schema {
                reason: "empty purpose".into(),
            });
        }
        Ok(claims)
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Parse plaintext that must be a JSON object whose values are all scalars
///
/// serde alone would also accept the positional array form of a struct.
fn parse_flat_object<C: DeserializeOwned>(plaintext: &[u8]) -> Result<C, DecodeFailure> {
    let value: serde_json::Value =
        serde_json::from_slice(plaintext).map_err(|e| DecodeFailure::Schema {
            reason: format!("not JSON: {e}"),
        })?;

    let Some(object) = value.as_object() else {
        return Err(DecodeFailure::Schema {
            reason: "not a JSON object".into(),
        });
    };

    if let Some((key, _)) = object
        .iter()
        .find(|(_, v)| v.is_object() || v.is_array())
    {
        return Err(DecodeFailure::Schema {
            reason: format!("nested value under '{key}'"),
        });
    }

    serde_json::from_value(value).map_err(|e| DecodeFailure::Schema {
        reason: e.to_string(),
    })
}

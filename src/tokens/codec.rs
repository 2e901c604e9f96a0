// ABOUTME: Authenticated encryption of token claims into URL-safe text and back
// ABOUTME: AES-256-GCM with a fresh nonce per token and the claims kind bound as associated data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use verbum_core::constants::tokens::{NONCE_BYTES, TAG_BYTES, TOKEN_LIFETIME_DAYS};
use verbum_core::errors::{AppError, AppResult};

use super::claims::{AuthClaims, ClaimsSchema, DecodeFailure, ResetClaims};
use crate::crypto::TokenKey;

/// Seals claims into opaque tokens under the process key
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: Aes256Gcm,
    lifetime: Duration,
}

impl TokenCodec {
    /// Build a codec from the process key and the token lifetime
    #[must_use]
    pub fn new(key: &TokenKey, lifetime: Duration) -> Self {
        Self {
            cipher: Aes256Gcm::new(GenericArray::from_slice(key.as_bytes())),
            lifetime,
        }
    }

    /// Build a codec with the standard 30-day token lifetime
    #[must_use]
    pub fn with_default_lifetime(key: &TokenKey) -> Self {
        Self::new(key, Duration::days(TOKEN_LIFETIME_DAYS))
    }

    /// Lifetime applied by the `issue_*` helpers
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Encrypt claims into a token string
    ///
    /// # Errors
    ///
    /// Returns an internal error if serialization or the cipher fails; neither
    /// happens for well-formed claims.
    pub fn encode<C: ClaimsSchema>(&self, claims: &C) -> AppResult<String> {
        let plaintext = serde_json::to_vec(claims)?;

        let mut nonce_bytes = [0u8; NONCE_BYTES];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = GenericArray::from_slice(&nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(
                nonce,
                Payload {
                    msg: &plaintext,
                    aad: C::KIND.as_bytes(),
                },
            )
            .map_err(|e| AppError::internal(format!("Token encryption failed: {e}")))?;

        let mut token = Vec::with_capacity(NONCE_BYTES + sealed.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    /// Decrypt and strictly parse a token string
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeFailure`] for malformed encoding, truncated input,
    /// failed authentication, or claims that do not match `C`'s schema.
    pub fn decode<C: ClaimsSchema>(&self, token: &str) -> Result<C, DecodeFailure> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| DecodeFailure::Encoding)?;

        if bytes.len() < NONCE_BYTES + TAG_BYTES {
            return Err(DecodeFailure::Truncated);
        }

        let (nonce_bytes, sealed) = bytes.split_at(NONCE_BYTES);
        let plaintext = self
            .cipher
            .decrypt(
                GenericArray::from_slice(nonce_bytes),
                Payload {
                    msg: sealed,
                    aad: C::KIND.as_bytes(),
                },
            )
            .map_err(|_| DecodeFailure::Authentication)?;

        C::from_json(&plaintext)
    }

    /// Issue a session token bound to the account's current password hash
    ///
    /// # Errors
    ///
    /// Propagates [`Self::encode`] failures.
    pub fn issue_auth(
        &self,
        subject_id: &str,
        email: &str,
        secret_fingerprint: &str,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        self.encode(&AuthClaims {
            subject_id: subject_id.to_owned(),
            email: email.to_owned(),
            secret_fingerprint: secret_fingerprint.to_owned(),
            expires_at: now + self.lifetime,
        })
    }

    /// Issue a reset token authorizing a single operation
    ///
    /// # Errors
    ///
    /// Propagates [`Self::encode`] failures.
    pub fn issue_reset(
        &self,
        subject_id: &str,
        email: &str,
        purpose: &str,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        self.encode(&ResetClaims {
            subject_id: subject_id.to_owned(),
            email: email.to_owned(),
            purpose: purpose.to_owned(),
            expires_at: now + self.lifetime,
        })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

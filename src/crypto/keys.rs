// ABOUTME: Symmetric token key management for the token codec
// ABOUTME: Loads the process key from base64 configuration, generates development keys, wipes on drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Process-wide token key
//!
//! One 32-byte AES-256 key encrypts every token the server issues. It is
//! loaded once at startup and never mutated afterwards; the codec borrows it
//! read-only from any number of request tasks.

use std::fmt;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;
use verbum_core::constants::{env_config, tokens::TOKEN_KEY_BYTES};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key used to encrypt and authenticate tokens
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenKey {
    key: [u8; TOKEN_KEY_BYTES],
}

impl TokenKey {
    /// Create a key from raw bytes - primarily for testing
    #[must_use]
    pub const fn from_bytes(key: [u8; TOKEN_KEY_BYTES]) -> Self {
        Self { key }
    }

    /// Generate a fresh random key from the OS entropy source
    #[must_use]
    pub fn generate() -> Self {
        let mut key = [0u8; TOKEN_KEY_BYTES];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Decode a key from its base64 configuration form
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not valid standard base64
    /// - The decoded key is not exactly 32 bytes
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let mut key_bytes = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| anyhow!("Invalid base64 encoding in {}: {e}", env_config::TOKEN_KEY))?;

        if key_bytes.len() != TOKEN_KEY_BYTES {
            let len = key_bytes.len();
            key_bytes.zeroize();
            return Err(anyhow!(
                "Token key must be exactly {TOKEN_KEY_BYTES} bytes, got {len} bytes"
            ));
        }

        let mut key = [0u8; TOKEN_KEY_BYTES];
        key.copy_from_slice(&key_bytes);
        key_bytes.zeroize();
        Ok(Self { key })
    }

    /// Generate a temporary key for development with appropriate warnings
    ///
    /// Tokens issued under a temporary key stop validating when the process restarts.
    #[must_use]
    pub fn generate_for_development() -> Self {
        warn!("{} not found in environment", env_config::TOKEN_KEY);
        warn!("Generating temporary token key for development - NOT SECURE FOR PRODUCTION");
        warn!("Issued tokens will not survive a restart");
        warn!("Run `verbum-admin generate-key` to create a persistent key");
        Self::generate()
    }

    /// Encode the key in its base64 configuration form
    #[must_use]
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.key)
    }

    /// Get the raw key bytes for encryption operations
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TOKEN_KEY_BYTES] {
        &self.key
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenKey(<redacted>)")
    }
}

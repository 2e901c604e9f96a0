// ABOUTME: Argon2id password hashing and verification off the async executor
// ABOUTME: The PHC hash string doubles as the fingerprint bound into auth tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;
use verbum_core::errors::{AppError, AppResult};

/// Hash a password with Argon2id and a random salt
///
/// Every call yields a different hash, so re-setting the same password still
/// revokes tokens bound to the previous hash.
///
/// # Errors
///
/// Returns an internal error if hashing fails or the blocking task panics.
pub async fn hash_password(password: String) -> AppResult<String> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Argon2 password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Check a password against a stored Argon2 PHC string
///
/// # Errors
///
/// Returns an internal error if the stored hash cannot be parsed or the
/// blocking task panics. A wrong password is `Ok(false)`.
pub async fn verify_password(password: String, stored_hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || -> AppResult<bool> {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::internal(format!("Stored password hash is invalid: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("correct horse".into()).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong horse".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let first = hash_password("same".into()).await.unwrap();
        let second = hash_password("same".into()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_garbage_hash_is_error() {
        assert!(verify_password("x".into(), "not-a-phc".into()).await.is_err());
    }
}

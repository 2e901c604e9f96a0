// ABOUTME: Cryptography module for token keys and password hashing
// ABOUTME: Centralizes key loading, key generation, and Argon2 helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cryptographic primitives for the Verbum server

pub mod keys;
/// Argon2id hashing run on the blocking pool
pub mod passwords;

pub use keys::TokenKey;
pub use passwords::{hash_password, verify_password};

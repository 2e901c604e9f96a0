// ABOUTME: Opaque token codec and the claims types it seals
// ABOUTME: Re-exports the codec, claims, and decode failure reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tokens
//!
//! Session and reset tokens are encrypted claims, not signed JWTs: the
//! contents are unreadable to clients and any modification fails
//! authentication. Only the codec may interpret a token string.

/// Claims types and strict parsing
pub mod claims;
/// AES-256-GCM token codec
pub mod codec;

pub use claims::{AuthClaims, ClaimsSchema, DecodeFailure, ResetClaims};
pub use codec::TokenCodec;
